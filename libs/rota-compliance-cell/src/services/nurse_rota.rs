//! Nurses-calendar aggregation.
//!
//! Same filtering discipline as the doctors fold (date window, weekends,
//! covid artifacts), but the facets differ: nurse presence is independent of
//! slot type, and session hours are recovered from the availability text to
//! spot staff working long days without a lunch slot.

use chrono::{Datelike, NaiveDate, Weekday};
use regex::Regex;

use crate::models::{NurseMonthAggregate, SlotRecord};
use crate::services::{dates, identity};

/// Hours a clinician can accumulate in one day before a missing lunch slot
/// becomes a warning.
pub const LUNCH_HOURS_THRESHOLD: f64 = 3.0;

fn is_sample_testing_type(slot_type: &str) -> bool {
    let lowered = slot_type.to_lowercase();
    lowered.contains("sample testing")
        || (lowered.contains("sample") && lowered.contains("testing"))
}

fn is_lunch_type(slot_type: &str) -> bool {
    slot_type.to_lowercase().contains("lunch")
}

/// Fold a snapshot of slot rows into per-day nurse-calendar aggregates for
/// `[month_start, month_end]`.
pub fn aggregate_nurse_month(
    rows: &[SlotRecord],
    month_start: NaiveDate,
    month_end: NaiveDate,
) -> NurseMonthAggregate {
    // HH:MM - HH:MM with hyphen, en-dash or "to" between the endpoints.
    let range_pattern =
        Regex::new(r"(?i)(\d{1,2}):(\d{2})\s*(?:-|\x{2013}|to)\s*(\d{1,2}):(\d{2})").unwrap();

    let mut aggregate = rows.iter().fold(
        NurseMonthAggregate::default(),
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

            day.total_slots += 1;

            // Presence is tested on every row, whatever the slot type.
            if identity::is_nurse_name(clinician) {
                day.nurse_names.insert(clinician.to_string());
            }

            if is_sample_testing_type(&row.slot_type) {
                day.has_sample_testing = true;
            }

            if is_lunch_type(&row.slot_type) && !clinician.is_empty() {
                day.lunch_names.insert(clinician.to_string());
            }

            if let Some(availability) = &row.availability {
                if let Some(hours) = session_hours(&range_pattern, availability) {
                    if !clinician.is_empty() {
                        *day.per_person_hours.entry(clinician.to_string()).or_insert(0.0) +=
                            hours;
                    }
                }
            }

            aggregate
        },
    );

    for day in aggregate.days.values_mut() {
        day.missing_lunch_names = day
            .per_person_hours
            .iter()
            .filter(|(name, hours)| {
                **hours > LUNCH_HOURS_THRESHOLD && !day.lunch_names.contains(*name)
            })
            .map(|(name, _)| name.clone())
            .collect();
    }

    aggregate
}

/// Pull an embedded `HH:MM - HH:MM` range out of an availability string and
/// return its length in hours. Garbled or reversed ranges contribute nothing.
fn session_hours(pattern: &Regex, availability: &str) -> Option<f64> {
    let captures = pattern.captures(availability)?;

    let start_hours: f64 = captures[1].parse().ok()?;
    let start_minutes: f64 = captures[2].parse().ok()?;
    let end_hours: f64 = captures[3].parse().ok()?;
    let end_minutes: f64 = captures[4].parse().ok()?;

    let start = start_hours * 60.0 + start_minutes;
    let end = end_hours * 60.0 + end_minutes;
    if end <= start {
        return None;
    }

    Some((end - start) / 60.0)
}
