pub mod alternatives;
pub mod dates;
pub mod doctor_rota;
pub mod identity;
pub mod nurse_rota;
pub mod rules;
pub mod slots;
pub mod warnings;

pub use alternatives::AlternativeSlotService;
pub use slots::SlotFeedService;
