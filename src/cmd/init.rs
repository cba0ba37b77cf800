use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use leavecal::calc::add_days;
use leavecal::data::{
    ConfigFile, Employee, Event, EventData, LeaveData, LeaveRequest, LeaveStatus, Persistable,
    WorkDaySet,
};
use std::fs;
use std::path::Path;

pub fn run() -> Result<()> {
    let dir = leavecal::data::persistence::get_data_dir()?;
    fs::create_dir_all(&dir)?;
    run_in_dir(&dir, Local::now().date_naive())?;
    tracing::info!(dir = %dir.display(), "data files initialized");
    println!("Data files initialized successfully.");
    Ok(())
}

/// Writes all default data files into `dir`, with sample dates anchored on
/// the first Monday of the month after `today`.
pub(crate) fn run_in_dir(dir: &Path, today: NaiveDate) -> Result<()> {
    let anchor = sample_anchor(today).context("could not place sample data near today")?;
    write_config(dir)?;
    write_leave(dir, anchor)?;
    write_events(dir, anchor)?;
    Ok(())
}

fn write_config(dir: &Path) -> Result<()> {
    let config = ConfigFile {
        settings: Default::default(),
        employee: Employee {
            name: "Sample Employee".to_string(),
            work_days: WorkDaySet::mon_fri(),
            vacation_balance: 30.0,
        },
    };
    config.save_to(dir)
}

fn write_leave(dir: &Path, anchor: NaiveDate) -> Result<()> {
    let mut data = LeaveData::default();
    data.add(LeaveRequest::new(
        1,
        anchor,
        day_after(anchor, 2)?,
        LeaveStatus::Approved,
    )?);
    let mut pending = LeaveRequest::new(
        2,
        day_after(anchor, 14)?,
        day_after(anchor, 18)?,
        LeaveStatus::Pending,
    )?;
    pending.end_half = true;
    pending.note = "Family visit".to_string();
    data.add(pending);
    data.save_to(dir)
}

fn write_events(dir: &Path, anchor: NaiveDate) -> Result<()> {
    let mut data = EventData::default();
    data.add(Event::all_day(
        "Team offsite",
        day_after(anchor, 7)?,
        day_after(anchor, 9)?,
    ));
    data.add(Event::timed(
        "Planning review",
        day_after(anchor, 8)?,
        NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
        NaiveTime::from_hms_opt(11, 30, 0).unwrap_or_default(),
    ));
    data.save_to(dir)
}

fn sample_anchor(today: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let to_monday = (7 - first.weekday().num_days_from_monday() as i64) % 7;
    add_days(first, to_monday)
}

fn day_after(date: NaiveDate, n: i64) -> Result<NaiveDate> {
    add_days(date, n).with_context(|| format!("{date} + {n} days is out of range"))
}
