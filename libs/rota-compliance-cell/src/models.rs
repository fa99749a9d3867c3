// libs/rota-compliance-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ==============================================================================
// SLOT ROW MODEL
// ==============================================================================

/// One scheduled appointment slot as exported by the clinical system.
///
/// Rows arrive either with canonical column names or with the raw report
/// headings ("Appointment Date", "Session Holder", ...); the aliases below
/// accept both so callers never have to pre-map columns. The clinician name
/// is the only identity the source data carries - there is no staff id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SlotRecord {
    #[serde(default, alias = "Appointment Date")]
    pub date: String,

    #[serde(default, alias = "Appointment Time")]
    pub time: Option<String>,

    #[serde(default, alias = "clinicianName", alias = "Session Holder")]
    pub clinician_name: String,

    #[serde(default, alias = "slotType", alias = "Slot Type")]
    pub slot_type: String,

    #[serde(
        default,
        alias = "durationMinutes",
        alias = "Duration",
        deserialize_with = "deserialize_duration"
    )]
    pub duration_minutes: Option<f64>,

    #[serde(default, alias = "Availability")]
    pub availability: Option<String>,
}

/// Duration reaches us as a number, a numeric string, or null depending on
/// which export produced the row. Anything unparseable reads as "no duration".
fn deserialize_duration<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(serde_json::Value::Number(number)) => number.as_f64(),
        Some(serde_json::Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    })
}

// ==============================================================================
// DERIVED AGGREGATES
// ==============================================================================

/// Per-day facets of the doctors calendar, rebuilt on every fetch.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DayAggregate {
    pub on_the_day_count: u32,
    pub one_week_count: u32,
    pub two_week_count: u32,
    pub has_duty: bool,
    /// Non-trainee clinicians with an on-the-day slot and a "(Dr)" marker.
    pub doctor_names: BTreeSet<String>,
    /// Collected independently of doctor_names; a name can sit in both this
    /// set and duty_doctor_names on the same day.
    pub trainee_names: BTreeSet<String>,
    pub duty_doctor_names: BTreeSet<String>,
    pub low_otd: bool,
    pub trainee_ratio: bool,
}

/// Per-day facets of the nurses calendar.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct NurseDayAggregate {
    pub total_slots: u32,
    pub nurse_names: BTreeSet<String>,
    pub has_sample_testing: bool,
    /// Summed session hours per clinician, parsed from availability ranges.
    pub per_person_hours: BTreeMap<String, f64>,
    /// Clinicians with a slot whose type mentions lunch that day.
    pub lunch_names: BTreeSet<String>,
    /// Clinicians over 3 accumulated hours with no lunch slot.
    pub missing_lunch_names: Vec<String>,
}

/// A month of doctor-calendar aggregation. Only dates that received at least
/// one contributing row get an entry; absent keys mean all-zero, no warning.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DoctorMonthAggregate {
    pub days: BTreeMap<NaiveDate, DayAggregate>,
    /// Rows dropped for an unparseable date or a known-bad clinician value.
    pub excluded_rows: usize,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct NurseMonthAggregate {
    pub days: BTreeMap<NaiveDate, NurseDayAggregate>,
    pub excluded_rows: usize,
}

// ==============================================================================
// WARNING CLASSIFICATION
// ==============================================================================

/// The single visual class a doctor-calendar day renders with.
/// Precedence when several facts apply: trainee ratio, then no duty,
/// then low on-the-day volume.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DoctorDayWarning {
    None,
    LowOnTheDay,
    NoDuty,
    TraineeRatio,
}

/// Nurse-calendar warnings are independent; both can fire on one day.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct NurseDayWarnings {
    pub lacks_sample_testing: bool,
    pub missing_lunch: Vec<String>,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct MonthQuery {
    /// Calendar month as YYYY-MM.
    pub month: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateRangeQuery {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlternativesRequest {
    pub slot: SlotRecord,
    pub horizon_days: Option<i64>,
}
