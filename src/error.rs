use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the calendar engine when an input cannot be interpreted.
///
/// Command and loader code wraps these in `anyhow` with context; the engine
/// itself never panics on well-formed dates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalendarError {
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid month {0}: expected 1-12")]
    InvalidMonth(u32),

    #[error("date out of supported range near {year}-{month:02}")]
    DateOutOfRange { year: i32, month: u32 },

    #[error("range end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("unknown weekday token '{0}': expected mon, tue, wed, thu, fri, sat or sun")]
    InvalidWeekday(String),

    #[error("selection is not complete")]
    IncompleteSelection,

    #[error("{0} is already covered by approved leave")]
    LockedDay(NaiveDate),

    #[error("request needs {requested} day(s) but only {available} remain")]
    InsufficientBalance { requested: f64, available: f64 },
}
