use crate::data::{Employee, LeaveRequest, LeaveStatus, leave::locked_days};
use crate::error::CalendarError;
use crate::select::{Selection, SelectionKey};
use chrono::NaiveDate;

/// What a selection would cost, computed right before submission.
#[derive(Clone, Debug, PartialEq)]
pub struct LeavePreview {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub start_half: bool,
    pub end_half: bool,
    pub days: f64,
    pub balance_after: f64,
}

impl LeavePreview {
    /// Turns the preview into a new pending request.
    pub fn into_request(self, id: u32) -> Result<LeaveRequest, CalendarError> {
        let mut req = LeaveRequest::new(id, self.start, self.end, LeaveStatus::Pending)?;
        req.start_half = self.start_half;
        req.end_half = self.end_half;
        Ok(req)
    }
}

/// Validates a finished selection against approved leave and the employee's
/// remaining balance.
///
/// The locked-day check is repeated here because approvals may have arrived
/// after the range was picked.
pub fn check_request<K: SelectionKey>(
    selection: &Selection<K>,
    employee: &Employee,
    requests: &[LeaveRequest],
) -> Result<LeavePreview, CalendarError> {
    let (start, end) = selection.days().ok_or(CalendarError::IncompleteSelection)?;
    if end < start {
        return Err(CalendarError::InvalidRange { start, end });
    }

    let locked = locked_days(requests);
    if let Some(&day) = locked.range(start..=end).next() {
        return Err(CalendarError::LockedDay(day));
    }

    let days = selection.chargeable_days(&employee.work_days);
    if days > employee.vacation_balance {
        return Err(CalendarError::InsufficientBalance {
            requested: days,
            available: employee.vacation_balance,
        });
    }

    Ok(LeavePreview {
        start,
        end,
        start_half: selection.start_half,
        end_half: selection.end_half,
        days,
        balance_after: employee.vacation_balance - days,
    })
}
