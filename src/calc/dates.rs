use crate::error::CalendarError;
use chrono::{Datelike, Days, NaiveDate};

pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` calendar date. No time zone is involved at any point.
pub fn parse_iso(s: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)
        .map_err(|_| CalendarError::InvalidDate(s.to_string()))
}

pub fn iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Returns a new date `n` days after `date` (or before, for negative `n`).
/// `None` when the result would leave chrono's supported range.
pub fn add_days(date: NaiveDate, n: i64) -> Option<NaiveDate> {
    if n >= 0 {
        date.checked_add_days(Days::new(n.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(n.unsigned_abs()))
    }
}

/// Iterates every date in `[start, end]` inclusive. Empty when `end < start`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// Years touched by `[start, end]`, ascending.
pub fn years_spanned(start: NaiveDate, end: NaiveDate) -> std::ops::RangeInclusive<i32> {
    if end < start {
        return start.year()..=start.year() - 1;
    }
    start.year()..=end.year()
}
