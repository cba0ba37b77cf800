use anyhow::{Result, bail};
use leavecal::calc::days_inclusive;
use leavecal::data::leave::locked_days;
use leavecal::data::{ConfigFile, Employee, LeaveData, LeaveStatus, Persistable};
use tracing::info;

/// Lists the requests, first applying a status change when one is given.
pub fn run(change: Option<(u32, LeaveStatus)>) -> Result<()> {
    let employee = ConfigFile::load()?.employee;
    let mut leave_data = LeaveData::load()?;
    if let Some((id, status)) = change {
        apply_status(&mut leave_data, id, status)?;
        leave_data.save()?;
        info!(id, %status, "leave request updated");
    }
    write_leave(&leave_data, &employee, &mut std::io::stdout())
}

/// Changes the status of request `id`. Approving fails when the request
/// touches a day already locked by another approved request.
pub(crate) fn apply_status(data: &mut LeaveData, id: u32, status: LeaveStatus) -> Result<()> {
    let Some(target) = data.requests.iter().find(|r| r.id == id) else {
        bail!("no leave request with id {id}");
    };
    if status == LeaveStatus::Approved {
        let others: Vec<_> = data.requests.iter().filter(|r| r.id != id).cloned().collect();
        let locked = locked_days(&others);
        if let Some(day) = days_inclusive(target.start, target.end).find(|d| locked.contains(d)) {
            bail!("request {id} overlaps approved leave on {day}");
        }
    }
    data.set_status(id, status);
    Ok(())
}

pub(crate) fn write_leave<W: std::io::Write>(
    data: &LeaveData,
    employee: &Employee,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Leave requests for {}", employee.name)?;
    writeln!(out, "---")?;
    writeln!(
        out,
        "  {:<4} {:<14} {:<14} {:<10} {:>6}  {}",
        "#", "Start", "End", "Status", "Days", "Note"
    )?;
    for r in &data.requests {
        let start = format!("{}{}", r.start, if r.start_half { " ½" } else { "" });
        let end = format!("{}{}", r.end, if r.end_half { " ½" } else { "" });
        writeln!(
            out,
            "  {:<4} {:<14} {:<14} {:<10} {:>6.1}  {}",
            r.id,
            start,
            end,
            r.status,
            r.chargeable_days(&employee.work_days),
            r.note
        )?;
    }
    let used = data.used_days(&employee.work_days);
    writeln!(out, "---")?;
    writeln!(out, "Total: {} request(s)", data.requests.len())?;
    writeln!(out, "{:<22} {:.1}", "Used (incl. pending):", used)?;
    writeln!(out, "{:<22} {:.1}", "Balance:", employee.vacation_balance)?;
    writeln!(
        out,
        "{:<22} {:.1}",
        "Remaining:",
        employee.vacation_balance - used
    )?;
    Ok(())
}
