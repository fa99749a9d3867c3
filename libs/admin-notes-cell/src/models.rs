// libs/admin-notes-cell/src/models.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A free-text action tag an administrator pins to one calendar date.
///
/// Notes are append-only in the store; "the" note for a date is whichever
/// was created last. The compliance core never reads these - they are a
/// display tag only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDayNote {
    pub appointment_date: NaiveDate,
    pub action: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdminNoteRequest {
    pub appointment_date: NaiveDate,
    pub action: String,
    pub created_by: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotesRangeQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}
