//! Day-level warning classification.
//!
//! Classification is deterministic: `today` always arrives as a parameter so
//! the same aggregate replays to the same answer in tests and on re-fetch.
//! Days already in the past are never flagged, for nurses as well as doctors.

use chrono::NaiveDate;

use crate::models::{DayAggregate, DoctorDayWarning, NurseDayAggregate, NurseDayWarnings};

/// Pick the single visual class for a doctor-calendar day.
///
/// Precedence: trainee ratio over no duty over low on-the-day volume. The
/// individual facts stay on the aggregate for detail views that list every
/// applicable warning at once.
pub fn classify_doctor_day(
    day: &DayAggregate,
    date: NaiveDate,
    today: NaiveDate,
) -> DoctorDayWarning {
    if date < today {
        return DoctorDayWarning::None;
    }

    if day.trainee_ratio {
        DoctorDayWarning::TraineeRatio
    } else if !day.has_duty {
        DoctorDayWarning::NoDuty
    } else if day.low_otd {
        DoctorDayWarning::LowOnTheDay
    } else {
        DoctorDayWarning::None
    }
}

/// Every warning that applies to a doctor-calendar day, in precedence order,
/// regardless of date. Feeds the per-day detail view.
pub fn doctor_day_warnings(day: &DayAggregate) -> Vec<DoctorDayWarning> {
    let mut warnings = Vec::new();
    if day.trainee_ratio {
        warnings.push(DoctorDayWarning::TraineeRatio);
    }
    if !day.has_duty {
        warnings.push(DoctorDayWarning::NoDuty);
    }
    if day.low_otd {
        warnings.push(DoctorDayWarning::LowOnTheDay);
    }
    warnings
}

/// Nurse warnings are not ranked - both can be live on the same day.
pub fn classify_nurse_day(
    day: &NurseDayAggregate,
    date: NaiveDate,
    today: NaiveDate,
) -> NurseDayWarnings {
    if date < today {
        return NurseDayWarnings::default();
    }

    NurseDayWarnings {
        lacks_sample_testing: !day.has_sample_testing,
        missing_lunch: day.missing_lunch_names.clone(),
    }
}
