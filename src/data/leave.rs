use crate::calc::dates::days_inclusive;
use crate::calc::workday::chargeable_days;
use crate::data::persistence::Persistable;
use crate::data::WorkDaySet;
use crate::error::CalendarError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Cancelled => "cancelled",
        };
        f.pad(s)
    }
}

/// A leave request. `end >= start` holds for every value of this type:
/// construction and deserialization both reject reversed ranges.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "LeaveRequestRecord")]
pub struct LeaveRequest {
    pub id: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub start_half: bool,
    #[serde(default)]
    pub end_half: bool,
    pub status: LeaveStatus,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
}

/// Wire shape of [`LeaveRequest`] before the range invariant is checked.
#[derive(Deserialize)]
struct LeaveRequestRecord {
    id: u32,
    start: NaiveDate,
    end: NaiveDate,
    #[serde(default)]
    start_half: bool,
    #[serde(default)]
    end_half: bool,
    status: LeaveStatus,
    #[serde(default)]
    note: String,
}

impl TryFrom<LeaveRequestRecord> for LeaveRequest {
    type Error = CalendarError;

    fn try_from(r: LeaveRequestRecord) -> Result<Self, Self::Error> {
        let mut req = LeaveRequest::new(r.id, r.start, r.end, r.status)?;
        req.start_half = r.start_half;
        req.end_half = r.end_half;
        req.note = r.note;
        Ok(req)
    }
}

impl LeaveRequest {
    pub fn new(
        id: u32,
        start: NaiveDate,
        end: NaiveDate,
        status: LeaveStatus,
    ) -> Result<Self, CalendarError> {
        if end < start {
            return Err(CalendarError::InvalidRange { start, end });
        }
        Ok(LeaveRequest {
            id,
            start,
            end,
            start_half: false,
            end_half: false,
            status,
            note: String::new(),
        })
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn chargeable_days(&self, work_days: &WorkDaySet) -> f64 {
        chargeable_days(self.start, self.end, work_days, self.start_half, self.end_half)
    }
}

#[derive(Serialize, Deserialize, Default, Debug)]
pub struct LeaveData {
    pub requests: Vec<LeaveRequest>,
}

impl Persistable for LeaveData {
    fn filename() -> &'static str {
        "leave.yaml"
    }
    fn is_json() -> bool {
        false
    }
}

impl LeaveData {
    pub fn add(&mut self, request: LeaveRequest) {
        self.requests.push(request);
    }

    pub fn next_id(&self) -> u32 {
        self.requests.iter().map(|r| r.id).max().map_or(1, |id| id + 1)
    }

    /// Sets the status of the request with `id`. Returns false if no such request.
    pub fn set_status(&mut self, id: u32, status: LeaveStatus) -> bool {
        match self.requests.iter_mut().find(|r| r.id == id) {
            Some(r) => {
                r.status = status;
                true
            }
            None => false,
        }
    }

    /// Every day covered by an approved request.
    pub fn locked_days(&self) -> BTreeSet<NaiveDate> {
        locked_days(&self.requests)
    }

    /// Days consumed by approved and pending requests.
    pub fn used_days(&self, work_days: &WorkDaySet) -> f64 {
        self.requests
            .iter()
            .filter(|r| matches!(r.status, LeaveStatus::Approved | LeaveStatus::Pending))
            .map(|r| r.chargeable_days(work_days))
            .sum()
    }
}

/// Expands approved requests into the set of days a new selection may not touch.
pub fn locked_days(requests: &[LeaveRequest]) -> BTreeSet<NaiveDate> {
    requests
        .iter()
        .filter(|r| r.status == LeaveStatus::Approved)
        .flat_map(|r| days_inclusive(r.start, r.end))
        .collect()
}
