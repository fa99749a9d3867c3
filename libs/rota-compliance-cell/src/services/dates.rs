use chrono::NaiveDate;

const MONTH_ABBREVIATIONS: [(&str, u32); 12] = [
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

/// Formats the loose fallback tries, in order, before and after swapping
/// dashes for spaces.
const LOOSE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d %b %Y", "%d %B %Y"];

/// Normalize a raw date value from any of the source feeds.
///
/// Three shapes are accepted: ISO-prefixed strings (first 10 characters),
/// `dd-MMM-yyyy` with a case-insensitive month abbreviation, and a loose
/// fallback through common formats with a dashes-to-spaces retry. All three
/// shapes resolve the same wall-clock date to the same `NaiveDate`; anything
/// unrecognizable is `None`, never a panic.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    parse_iso_prefix(trimmed)
        .or_else(|| parse_day_month_year(trimmed))
        .or_else(|| parse_loose(trimmed))
        .or_else(|| parse_loose(&trimmed.replace('-', " ")))
}

/// Canonical `YYYY-MM-DD` key for a calendar date (local fields, never UTC).
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d").ok()
}

/// Resolve a `YYYY-MM` month string to its first and last calendar day.
pub fn month_bounds(month: &str) -> Option<(NaiveDate, NaiveDate)> {
    let mut parts = month.trim().splitn(2, '-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month_number = parts.next()?.parse::<u32>().ok()?;

    let start = NaiveDate::from_ymd_opt(year, month_number, 1)?;
    let next_month_start = if month_number == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month_number + 1, 1)?
    };

    Some((start, next_month_start.pred_opt()?))
}

fn parse_iso_prefix(text: &str) -> Option<NaiveDate> {
    let head = text.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn parse_day_month_year(text: &str) -> Option<NaiveDate> {
    let mut parts = text.splitn(3, '-');
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    let month_text = parts.next()?.trim().to_lowercase();
    let year = parts.next()?.trim().parse::<i32>().ok()?;

    let month = MONTH_ABBREVIATIONS
        .iter()
        .find(|(abbreviation, _)| month_text.starts_with(abbreviation))
        .map(|(_, number)| *number)?;

    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_loose(text: &str) -> Option<NaiveDate> {
    LOOSE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}
