use crate::error::CalendarError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_token(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

pub fn parse_weekday_token(token: &str) -> Result<Weekday, CalendarError> {
    match token.trim().to_ascii_lowercase().as_str() {
        "mon" => Ok(Weekday::Mon),
        "tue" => Ok(Weekday::Tue),
        "wed" => Ok(Weekday::Wed),
        "thu" => Ok(Weekday::Thu),
        "fri" => Ok(Weekday::Fri),
        "sat" => Ok(Weekday::Sat),
        "sun" => Ok(Weekday::Sun),
        _ => Err(CalendarError::InvalidWeekday(token.to_string())),
    }
}

/// The weekdays an employee regularly works, stored as a 7-bit mask
/// (bit 0 = Monday). Serialized as a list of `mon`..`sun` tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct WorkDaySet(u8);

impl WorkDaySet {
    pub fn empty() -> Self {
        WorkDaySet(0)
    }

    pub fn mon_fri() -> Self {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ]
        .into_iter()
        .collect()
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_monday();
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    pub fn works_on(&self, date: NaiveDate) -> bool {
        self.contains(date.weekday())
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Weekdays in the set, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEKDAYS.into_iter().filter(|d| self.contains(*d))
    }
}

impl FromIterator<Weekday> for WorkDaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WorkDaySet::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl TryFrom<Vec<String>> for WorkDaySet {
    type Error = CalendarError;

    fn try_from(tokens: Vec<String>) -> Result<Self, Self::Error> {
        tokens.iter().map(|t| parse_weekday_token(t)).collect()
    }
}

impl From<WorkDaySet> for Vec<String> {
    fn from(set: WorkDaySet) -> Self {
        set.iter().map(|d| weekday_token(d).to_string()).collect()
    }
}

impl FromStr for WorkDaySet {
    type Err = CalendarError;

    /// Parses a comma-separated token list such as `mon,tue,thu`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(parse_weekday_token)
            .collect()
    }
}

impl fmt::Display for WorkDaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<&str> = self.iter().map(weekday_token).collect();
        write!(f, "{}", tokens.join(","))
    }
}

/// The slice of the employee record the leave engine needs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub name: String,
    #[serde(default = "WorkDaySet::mon_fri")]
    pub work_days: WorkDaySet,
    #[serde(default)]
    pub vacation_balance: f64,
}

impl Default for Employee {
    fn default() -> Self {
        Employee {
            name: "Employee".to_string(),
            work_days: WorkDaySet::mon_fri(),
            vacation_balance: 30.0,
        }
    }
}
