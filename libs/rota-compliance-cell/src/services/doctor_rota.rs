//! Doctors-calendar aggregation.
//!
//! A pure fold over an already-fetched snapshot of slot rows: no I/O, no
//! clock reads, safe to re-run. Weekends never contribute, and counts are
//! slot volume - the same clinician appearing twice counts twice.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::{DoctorMonthAggregate, SlotRecord};
use crate::services::{dates, identity};

pub const MONDAY_OTD_THRESHOLD: u32 = 25;
pub const WEEKDAY_OTD_THRESHOLD: u32 = 20;

/// Minimum acceptable on-the-day volume for a weekday.
pub fn otd_threshold(weekday: Weekday) -> u32 {
    if weekday == Weekday::Mon {
        MONDAY_OTD_THRESHOLD
    } else {
        WEEKDAY_OTD_THRESHOLD
    }
}

/// Two textual variants of the on-the-day label are known in the feed; the
/// list is provisional and new wordings get added here as they show up.
pub fn is_on_the_day_type(slot_type: &str) -> bool {
    let lowered = slot_type.to_lowercase();
    lowered.contains("book on the day")
        || (lowered.contains("on the day") && lowered.contains("gp") && lowered.contains("book"))
}

pub fn is_duty_type(slot_type: &str) -> bool {
    let lowered = slot_type.to_lowercase();
    lowered.contains("emergency gps to book only")
        || (lowered.contains("emergency") && lowered.contains("book only"))
}

fn is_one_week_type(slot_type: &str) -> bool {
    slot_type.to_lowercase().contains("within 1 week")
}

fn is_two_week_type(slot_type: &str) -> bool {
    slot_type.to_lowercase().contains("1 to 2 week")
}

/// Fold a snapshot of slot rows into per-day doctor-calendar aggregates for
/// `[month_start, month_end]`.
///
/// Rows are dropped when the date does not parse (counted in
/// `excluded_rows`), falls outside the range or on a weekend, or the
/// clinician field is a covid artifact. A single row can feed several facets
/// at once: a duty row still counts toward the 1-week/2-week columns when
/// its type text matches both.
pub fn aggregate_doctor_month(
    rows: &[SlotRecord],
    month_start: NaiveDate,
    month_end: NaiveDate,
) -> DoctorMonthAggregate {
    let mut aggregate = rows.iter().fold(
        DoctorMonthAggregate::default(),
        |mut aggregate, row| {
            let Some(date) = dates::normalize_date(&row.date) else {
                aggregate.excluded_rows += 1;
                return aggregate;
            };
            if date < month_start || date > month_end {
                return aggregate;
            }
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                return aggregate;
            }
            if identity::is_covid_artifact(&row.clinician_name) {
                aggregate.excluded_rows += 1;
                return aggregate;
            }

            let day = aggregate.days.entry(date).or_default();
            let clinician = row.clinician_name.trim();

            if is_duty_type(&row.slot_type) {
                day.has_duty = true;
                if !clinician.is_empty() {
                    day.duty_doctor_names.insert(clinician.to_string());
                }
            }
            if is_one_week_type(&row.slot_type) {
                day.one_week_count += 1;
            }
            if is_two_week_type(&row.slot_type) {
                day.two_week_count += 1;
            }
            if is_on_the_day_type(&row.slot_type) {
                // Availability is ignored on purpose: embargoed and booked
                // slots still count toward the day's volume.
                day.on_the_day_count += 1;

                if identity::is_trainee(clinician) {
                    day.trainee_names.insert(clinician.to_string());
                } else if identity::has_doctor_marker(clinician) {
                    day.doctor_names.insert(clinician.to_string());
                }
            }

            aggregate
        },
    );

    for (date, day) in aggregate.days.iter_mut() {
        day.low_otd = day.on_the_day_count < otd_threshold(date.weekday());

        let every_trainee_present = identity::TRAINEE_IDENTIFIERS.iter().all(|identifier| {
            let identifier = identifier.to_lowercase();
            day.trainee_names
                .iter()
                .any(|name| name.to_lowercase().contains(&identifier))
        });
        day.trainee_ratio = every_trainee_present && day.doctor_names.len() == 1;
    }

    aggregate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn otd_row(date: &str, clinician: &str) -> SlotRecord {
        SlotRecord {
            date: date.to_string(),
            time: Some("08:30".to_string()),
            clinician_name: clinician.to_string(),
            slot_type: "Book on the Day".to_string(),
            duration_minutes: Some(10.0),
            availability: Some("Available".to_string()),
        }
    }

    fn typed_row(date: &str, clinician: &str, slot_type: &str) -> SlotRecord {
        SlotRecord {
            slot_type: slot_type.to_string(),
            ..otd_row(date, clinician)
        }
    }

    fn november() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 30).unwrap(),
        )
    }

    #[test]
    fn single_monday_slot_is_low_volume() {
        let (start, end) = november();
        // 2025-11-03 is a Monday.
        let rows = vec![otd_row("03-Nov-2025", "SMITH, Jane (Dr)")];

        let aggregate = aggregate_doctor_month(&rows, start, end);
        let day = &aggregate.days[&NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()];

        assert_eq!(day.on_the_day_count, 1);
        assert!(day.low_otd, "1 < 25 on a Monday");
        assert!(day.doctor_names.contains("SMITH, Jane (Dr)"));
        assert_eq!(aggregate.excluded_rows, 0);
    }

    #[test]
    fn monday_threshold_boundary() {
        let (start, end) = november();

        let below: Vec<SlotRecord> =
            (0..24).map(|_| otd_row("03-Nov-2025", "SMITH, Jane (Dr)")).collect();
        let aggregate = aggregate_doctor_month(&below, start, end);
        assert!(aggregate.days[&NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()].low_otd);

        let at: Vec<SlotRecord> =
            (0..25).map(|_| otd_row("03-Nov-2025", "SMITH, Jane (Dr)")).collect();
        let aggregate = aggregate_doctor_month(&at, start, end);
        assert!(!aggregate.days[&NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()].low_otd);
    }

    #[test]
    fn other_weekday_threshold_boundary() {
        let (start, end) = november();

        // 2025-11-04 is a Tuesday.
        let below: Vec<SlotRecord> =
            (0..19).map(|_| otd_row("04-Nov-2025", "SMITH, Jane (Dr)")).collect();
        let aggregate = aggregate_doctor_month(&below, start, end);
        assert!(aggregate.days[&NaiveDate::from_ymd_opt(2025, 11, 4).unwrap()].low_otd);

        let at: Vec<SlotRecord> =
            (0..20).map(|_| otd_row("04-Nov-2025", "SMITH, Jane (Dr)")).collect();
        let aggregate = aggregate_doctor_month(&at, start, end);
        assert!(!aggregate.days[&NaiveDate::from_ymd_opt(2025, 11, 4).unwrap()].low_otd);
    }

    #[test]
    fn weekend_rows_contribute_nothing() {
        let (start, end) = november();
        // 2025-11-08 is a Saturday, 2025-11-09 a Sunday.
        let rows = vec![
            otd_row("08-Nov-2025", "SMITH, Jane (Dr)"),
            otd_row("09-Nov-2025", "SMITH, Jane (Dr)"),
        ];

        let aggregate = aggregate_doctor_month(&rows, start, end);
        assert!(aggregate.days.is_empty());
        assert_eq!(aggregate.excluded_rows, 0);
    }

    #[test]
    fn covid_rows_are_dropped_before_counting() {
        let (start, end) = november();
        let rows = vec![
            otd_row("03-Nov-2025", "COVID-19"),
            otd_row("03-Nov-2025", "SMITH, Jane (Dr)"),
        ];

        let aggregate = aggregate_doctor_month(&rows, start, end);
        let day = &aggregate.days[&NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()];

        assert_eq!(day.on_the_day_count, 1);
        assert!(!day.doctor_names.iter().any(|name| name.contains("COVID")));
        assert_eq!(aggregate.excluded_rows, 1);
    }

    #[test]
    fn unparseable_dates_land_in_the_excluded_bucket() {
        let (start, end) = november();
        let rows = vec![
            otd_row("not a date", "SMITH, Jane (Dr)"),
            otd_row("03-Nov-2025", "SMITH, Jane (Dr)"),
        ];

        let aggregate = aggregate_doctor_month(&rows, start, end);
        assert_eq!(aggregate.excluded_rows, 1);
        assert_eq!(aggregate.days.len(), 1);
    }

    #[test]
    fn out_of_month_rows_are_filtered_silently() {
        let (start, end) = november();
        let rows = vec![otd_row("01-Dec-2025", "SMITH, Jane (Dr)")];

        let aggregate = aggregate_doctor_month(&rows, start, end);
        assert!(aggregate.days.is_empty());
        assert_eq!(aggregate.excluded_rows, 0);
    }

    #[test]
    fn duty_rows_set_duty_without_touching_otd() {
        let (start, end) = november();
        let rows = vec![typed_row(
            "03-Nov-2025",
            "SMITH, Jane (Dr)",
            "Emergency GPs to book only",
        )];

        let aggregate = aggregate_doctor_month(&rows, start, end);
        let day = &aggregate.days[&NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()];

        assert!(day.has_duty);
        assert!(day.duty_doctor_names.contains("SMITH, Jane (Dr)"));
        assert_eq!(day.on_the_day_count, 0);
        assert!(day.doctor_names.is_empty());
    }

    #[test]
    fn week_window_counters_are_independent_of_otd() {
        let (start, end) = november();
        let rows = vec![
            typed_row("03-Nov-2025", "SMITH, Jane (Dr)", "Appointment within 1 week"),
            typed_row("03-Nov-2025", "SMITH, Jane (Dr)", "Appointment 1 to 2 weeks"),
        ];

        let aggregate = aggregate_doctor_month(&rows, start, end);
        let day = &aggregate.days[&NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()];

        assert_eq!(day.one_week_count, 1);
        assert_eq!(day.two_week_count, 1);
        assert_eq!(day.on_the_day_count, 0);
    }

    #[test]
    fn otd_variant_wording_is_recognized() {
        let (start, end) = november();
        let rows = vec![typed_row(
            "03-Nov-2025",
            "SMITH, Jane (Dr)",
            "On The Day GP appointments - Book today",
        )];

        let aggregate = aggregate_doctor_month(&rows, start, end);
        let day = &aggregate.days[&NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()];
        assert_eq!(day.on_the_day_count, 1);
    }

    #[test]
    fn trainee_ratio_needs_both_trainees_and_a_single_doctor() {
        let (start, end) = november();
        let mut rows = vec![
            otd_row("03-Nov-2025", "ADEYEMI, Tolu (Dr)"),
            otd_row("03-Nov-2025", "FENWICK, Laura (Dr)"),
            otd_row("03-Nov-2025", "SMITH, Jane (Dr)"),
        ];

        let aggregate = aggregate_doctor_month(&rows, start, end);
        let day = &aggregate.days[&NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()];
        assert!(day.trainee_ratio);
        assert_eq!(day.doctor_names.len(), 1);
        assert_eq!(day.trainee_names.len(), 2);

        // A second non-trainee doctor clears the warning.
        rows.push(otd_row("03-Nov-2025", "PATEL, Ravi (Dr)"));
        let aggregate = aggregate_doctor_month(&rows, start, end);
        let day = &aggregate.days[&NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()];
        assert!(!day.trainee_ratio);
    }

    #[test]
    fn one_trainee_alone_does_not_trip_the_ratio() {
        let (start, end) = november();
        let rows = vec![
            otd_row("03-Nov-2025", "ADEYEMI, Tolu (Dr)"),
            otd_row("03-Nov-2025", "SMITH, Jane (Dr)"),
        ];

        let aggregate = aggregate_doctor_month(&rows, start, end);
        let day = &aggregate.days[&NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()];
        assert!(!day.trainee_ratio);
    }

    #[test]
    fn repeated_clinician_rows_all_count() {
        let (start, end) = november();
        let rows = vec![
            otd_row("03-Nov-2025", "SMITH, Jane (Dr)"),
            otd_row("03-Nov-2025", "SMITH, Jane (Dr)"),
            otd_row("03-Nov-2025", "SMITH, Jane (Dr)"),
        ];

        let aggregate = aggregate_doctor_month(&rows, start, end);
        let day = &aggregate.days[&NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()];

        // Counts are slot volume, the name set deduplicates.
        assert_eq!(day.on_the_day_count, 3);
        assert_eq!(day.doctor_names.len(), 1);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let (start, end) = november();
        let rows = vec![
            otd_row("03-Nov-2025", "SMITH, Jane (Dr)"),
            typed_row("04-Nov-2025", "SMITH, Jane (Dr)", "Emergency GPs to book only"),
            otd_row("bad date", "SMITH, Jane (Dr)"),
        ];

        let first = aggregate_doctor_month(&rows, start, end);
        let second = aggregate_doctor_month(&rows, start, end);
        assert_eq!(first, second);
    }
}
