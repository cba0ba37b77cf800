use crate::calc::dates::add_days;
use crate::error::CalendarError;
use chrono::{Datelike, NaiveDate};

pub const GRID_CELLS: usize = 42;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    /// False for the lead/trail days borrowed from neighbouring months.
    pub in_month: bool,
}

/// Monday-first 6x7 matrix for `month` of `year`, flattened row by row.
///
/// The first cell is the Monday on or before the 1st of the month; the grid
/// always spans 42 days regardless of how many weeks the month touches.
pub fn month_grid(year: i32, month: u32) -> Result<[GridCell; GRID_CELLS], CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth(month));
    }
    let out_of_range = CalendarError::DateOutOfRange { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(out_of_range.clone())?;
    let lead = first.weekday().num_days_from_monday() as i64;
    let grid_start = add_days(first, -lead).ok_or(out_of_range.clone())?;
    add_days(grid_start, GRID_CELLS as i64 - 1).ok_or(out_of_range)?;

    Ok(std::array::from_fn(|i| {
        // In range: both ends were checked above.
        let date = grid_start + chrono::Days::new(i as u64);
        GridCell {
            date,
            in_month: date.month() == month && date.year() == year,
        }
    }))
}

/// The grid split into its six week rows.
pub fn month_weeks(grid: &[GridCell; GRID_CELLS]) -> impl Iterator<Item = &[GridCell]> {
    grid.chunks(7)
}

/// Monday-to-Sunday week containing `date`. Days that fall outside chrono's
/// range at the extreme ends of the calendar are replaced by `date` itself.
pub fn week_of(date: NaiveDate) -> [NaiveDate; 7] {
    let offset = date.weekday().num_days_from_monday() as i64;
    std::array::from_fn(|i| add_days(date, i as i64 - offset).unwrap_or(date))
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    match (
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
        NaiveDate::from_ymd_opt(year, month, 1),
    ) {
        (Some(next), Some(first)) => next.signed_duration_since(first).num_days() as u32,
        _ => 31,
    }
}

pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let year = date.year();
    let month = date.month() as i32;
    let new_total = month - 1 + months;
    let new_month = (new_total.rem_euclid(12) + 1) as u32;
    let new_year = year + new_total.div_euclid(12);
    let new_day = date.day().min(days_in_month(new_year, new_month));
    NaiveDate::from_ymd_opt(new_year, new_month, new_day).unwrap_or(date)
}
