use anyhow::{Result, bail};
use chrono::{Datelike, Local};
use leavecal::calc::holidays_for;
use leavecal::data::Holiday;

pub fn run(year: Option<i32>) -> Result<()> {
    let year = year.unwrap_or_else(|| Local::now().year());
    let holidays = holidays_for(year);
    if holidays.is_empty() {
        bail!("no holiday calendar available for year {year}");
    }
    write_holidays(year, &holidays, &mut std::io::stdout())
}

pub(crate) fn write_holidays<W: std::io::Write>(
    year: i32,
    holidays: &[Holiday],
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Holidays {year}")?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<14} {:<5} {}", "Date", "Day", "Name")?;
    for h in holidays {
        writeln!(
            out,
            "  {:<14} {:<5} {}",
            h.date.format("%Y-%m-%d").to_string(),
            h.date.format("%a").to_string(),
            h.name
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} holiday(s)", holidays.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_write_holidays_empty() {
        let mut buf = Vec::new();
        write_holidays(2025, &[], &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Holidays 2025"));
        assert!(out.contains("Total: 0 holiday(s)"));
    }

    #[test]
    fn test_write_holidays_single() {
        let holidays = vec![Holiday::new("New Year's Day", d(2025, 1, 1))];
        let mut buf = Vec::new();
        write_holidays(2025, &holidays, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("New Year's Day"));
        assert!(out.contains("2025-01-01"));
        assert!(out.contains("Wed"));
        assert!(out.contains("Total: 1 holiday(s)"));
    }

    #[test]
    fn test_write_holidays_computed_year() {
        let mut buf = Vec::new();
        write_holidays(2025, &holidays_for(2025), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("2025-04-18"), "Good Friday missing");
        assert!(out.contains("2025-04-21"), "Easter Monday missing");
        assert!(out.contains("Total: 12 holiday(s)"));
    }

    #[test]
    fn test_write_holidays_sorted_by_date() {
        let mut buf = Vec::new();
        write_holidays(2026, &holidays_for(2026), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let new_year = out.find("New Year's Day").unwrap();
        let christmas = out.find("Christmas Day").unwrap();
        assert!(new_year < christmas);
    }
}
