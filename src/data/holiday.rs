use chrono::NaiveDate;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
pub struct Holiday {
    pub name: String,
    pub date: NaiveDate,
}

impl Holiday {
    pub fn new(name: &str, date: NaiveDate) -> Self {
        Holiday {
            name: name.to_string(),
            date,
        }
    }
}

/// Computed holidays for one or more years, kept sorted by date.
#[derive(Default, Debug, Clone)]
pub struct HolidayData {
    pub holidays: Vec<Holiday>,
}

impl HolidayData {
    pub fn extend(&mut self, holidays: impl IntoIterator<Item = Holiday>) {
        self.holidays.extend(holidays);
        self.holidays.sort_by_key(|h| h.date);
    }

    pub fn get_holiday_map(&self) -> HashMap<NaiveDate, &Holiday> {
        self.holidays.iter().map(|h| (h.date, h)).collect()
    }
}
