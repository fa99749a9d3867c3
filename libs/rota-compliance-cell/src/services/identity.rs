//! Clinician identity classification.
//!
//! The slot feed carries no staff ids - the free-text session-holder name is
//! the only identity there is. Every list here is matched as a
//! case-insensitive substring, and they are kept together as configuration
//! data so a staffing change touches one module only.

/// Name fragments identifying the practice's two GP trainees.
pub const TRAINEE_IDENTIFIERS: [&str; 2] = ["ADEYEMI", "FENWICK"];

/// Surnames of the nursing team.
pub const NURSE_SURNAMES: [&str; 5] = ["MASTERSON", "WHITFIELD", "OGDEN", "CARVER", "LINDLEY"];

/// The two healthcare assistants who cover blood, ECG, hypertension-review
/// and flu clinics.
pub const HCA_TEAM: [&str; 2] = ["MANSELL, Kelly (Miss)", "BARTON, Paula (Mrs)"];

/// Sole clinician for combined hypertension/CKD reviews.
pub const CKD_REVIEWER: &str = "PRITCHARD, Susan (Mrs)";

/// Sole clinician for B12 injection slots.
pub const B12_CLINICIAN: &str = "AMISON, Kelly (Miss)";

pub fn is_trainee(name: &str) -> bool {
    let lowered = name.to_lowercase();
    TRAINEE_IDENTIFIERS
        .iter()
        .any(|identifier| lowered.contains(&identifier.to_lowercase()))
}

pub fn is_nurse_name(name: &str) -> bool {
    let lowered = name.to_lowercase();
    NURSE_SURNAMES
        .iter()
        .any(|surname| lowered.contains(&surname.to_lowercase()))
}

/// Doctors are recognized by the "(Dr)" honorific embedded in the name.
pub fn has_doctor_marker(name: &str) -> bool {
    name.to_lowercase().contains("(dr)")
}

/// The feed occasionally carries leftover covid-clinic pseudo-holders; those
/// rows are dropped before any counting.
pub fn is_covid_artifact(name: &str) -> bool {
    name.to_lowercase().contains("covid")
}
