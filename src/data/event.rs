use crate::data::persistence::Persistable;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Event {
    pub title: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Event {
    pub fn all_day(title: &str, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Event {
            title: title.to_string(),
            start_date,
            end_date: Some(end_date),
            is_all_day: true,
            start_time: None,
            end_time: None,
            location: None,
        }
    }

    pub fn timed(title: &str, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Event {
            title: title.to_string(),
            start_date: date,
            end_date: Some(date),
            is_all_day: false,
            start_time: Some(start),
            end_time: Some(end),
            location: None,
        }
    }

    /// Last day the event covers; falls back to the start day when no end is set
    /// or the end precedes the start.
    pub fn last_date(&self) -> NaiveDate {
        match self.end_date {
            Some(end) if end > self.start_date => end,
            _ => self.start_date,
        }
    }

    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start_date <= to && self.last_date() >= from
    }
}

#[derive(Serialize, Deserialize, Default, Debug)]
pub struct EventData {
    pub events: Vec<Event>,
}

impl Persistable for EventData {
    fn filename() -> &'static str {
        "events.json"
    }
    fn is_json() -> bool {
        true
    }
}

impl EventData {
    pub fn add(&mut self, event: Event) {
        self.events.push(event);
        self.events
            .sort_by(|a, b| (a.start_date, a.start_time).cmp(&(b.start_date, b.start_time)));
    }

    /// Events touching `[from, to]`, in stored order.
    pub fn between(&self, from: NaiveDate, to: NaiveDate) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| e.overlaps(from, to))
            .cloned()
            .collect()
    }
}
