use anyhow::{Context, Result};
use leavecal::calc::{Workday, chargeable_days, classify_days, parse_iso};
use leavecal::data::{ConfigFile, Employee, Persistable, WorkDaySet};
use std::str::FromStr;

pub fn run(
    start: &str,
    end: &str,
    start_half: bool,
    end_half: bool,
    work_days: Option<&str>,
) -> Result<()> {
    let start = parse_iso(start).context("invalid start date")?;
    let end = parse_iso(end).context("invalid end date")?;
    let mut employee = ConfigFile::load()?.employee;
    if let Some(list) = work_days {
        employee.work_days = WorkDaySet::from_str(list).context("invalid --work-days")?;
    }

    let report = CountReport {
        days: classify_days(start, end, &employee.work_days),
        total: chargeable_days(start, end, &employee.work_days, start_half, end_half),
        start_half,
        end_half,
    };
    tracing::debug!(%start, %end, total = report.total, "counted chargeable days");
    write_count(&report, &employee, &mut std::io::stdout())
}

pub(crate) struct CountReport {
    pub days: Vec<Workday>,
    pub total: f64,
    pub start_half: bool,
    pub end_half: bool,
}

pub(crate) fn write_count<W: std::io::Write>(
    report: &CountReport,
    employee: &Employee,
    out: &mut W,
) -> Result<()> {
    let (Some(first), Some(last)) = (report.days.first(), report.days.last()) else {
        writeln!(out, "Empty range: end date is before start date.")?;
        writeln!(out, "{:<22} {:.1}", "Chargeable Days:", 0.0)?;
        return Ok(());
    };

    writeln!(
        out,
        "Range: [{} - {}]  work days: {}",
        first.date.format("%Y-%m-%d"),
        last.date.format("%Y-%m-%d"),
        employee.work_days
    )?;
    writeln!(out, "---")?;
    for (i, day) in report.days.iter().enumerate() {
        let kind = if let Some(name) = &day.holiday_name {
            format!("holiday ({name})")
        } else if day.is_workday {
            let half = (i == 0 && report.start_half)
                || (i == report.days.len() - 1 && report.end_half);
            if half { "half day" } else { "work day" }.to_string()
        } else {
            "off".to_string()
        };
        writeln!(
            out,
            "  {} {}  {}",
            day.date.format("%Y-%m-%d"),
            day.date.format("%a"),
            kind
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "{:<22} {:.1}", "Chargeable Days:", report.total)?;
    writeln!(out, "{:<22} {:.1}", "Balance:", employee.vacation_balance)?;
    writeln!(
        out,
        "{:<22} {:.1}",
        "Balance After:",
        employee.vacation_balance - report.total
    )?;
    Ok(())
}
