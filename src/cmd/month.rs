use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use leavecal::calc::grid::{month_name, month_weeks};
use leavecal::calc::{holiday_set_between, month_grid};
use leavecal::data::{LeaveData, Persistable};
use std::collections::BTreeSet;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub fn run(year: Option<i32>, month: Option<u32>) -> Result<()> {
    let today = Local::now().date_naive();
    let year = year.unwrap_or(today.year());
    let month = month.unwrap_or(today.month());
    let locked = LeaveData::load()?.locked_days();
    write_month(year, month, &locked, &mut std::io::stdout())
}

/// Prints a Monday-first grid. Holidays are marked `*`, approved leave `#`,
/// and days outside the month are shown in parentheses.
pub(crate) fn write_month<W: std::io::Write>(
    year: i32,
    month: u32,
    locked: &BTreeSet<NaiveDate>,
    out: &mut W,
) -> Result<()> {
    let grid = month_grid(year, month).with_context(|| format!("cannot show {year}-{month:02}"))?;
    let first = grid[0].date;
    let last = grid[grid.len() - 1].date;
    let holidays = holiday_set_between(first, last);

    writeln!(out, "{} {}", month_name(month), year)?;
    let header: Vec<String> = WEEKDAYS.iter().map(|d| format!(" {d} ")).collect();
    writeln!(out, "{}", header.join(" "))?;
    for week in month_weeks(&grid) {
        let line: String = week
            .iter()
            .map(|cell| {
                let mark = if locked.contains(&cell.date) {
                    '#'
                } else if holidays.contains(&cell.date) {
                    '*'
                } else {
                    ' '
                };
                if cell.in_month {
                    format!(" {:>2}{} ", cell.date.day(), mark)
                } else {
                    format!("({:>2}{})", cell.date.day(), mark)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{}", line.trim_end())?;
    }
    writeln!(out, "---")?;
    writeln!(out, "* holiday   # approved leave   (n) other month")?;
    Ok(())
}
