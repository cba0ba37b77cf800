use crate::calc::dates::{add_days, years_spanned};
use crate::data::{Holiday, HolidayData};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Public holidays on a fixed (month, day) every year.
const FIXED_HOLIDAYS: [(u32, u32, &str); 7] = [
    (1, 1, "New Year's Day"),
    (1, 6, "Epiphany"),
    (5, 1, "Labour Day"),
    (10, 3, "German Unity Day"),
    (11, 1, "All Saints' Day"),
    (12, 25, "Christmas Day"),
    (12, 26, "St. Stephen's Day"),
];

/// Public holidays at a fixed day offset from Easter Sunday.
const MOVABLE_HOLIDAYS: [(i64, &str); 5] = [
    (-2, "Good Friday"),
    (1, "Easter Monday"),
    (39, "Ascension Day"),
    (50, "Whit Monday"),
    (60, "Corpus Christi"),
];

/// Easter Sunday of the Gregorian calendar (anonymous Gregorian computus).
///
/// Integer arithmetic only. Returns `None` for years chrono cannot represent.
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let y = year;
    let a = y.rem_euclid(19);
    let b = y.div_euclid(100);
    let c = y.rem_euclid(100);
    let d = b.div_euclid(4);
    let e = b.rem_euclid(4);
    let f = (b + 8).div_euclid(25);
    let g = (b - f + 1).div_euclid(3);
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c.div_euclid(4);
    let k = c.rem_euclid(4);
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l).div_euclid(451);
    let n = h + l - 7 * m + 114;
    let month = n.div_euclid(31) as u32;
    let day = (n.rem_euclid(31) + 1) as u32;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// All public holidays of `year`, sorted by date.
pub fn holidays_for(year: i32) -> Vec<Holiday> {
    let mut data = HolidayData::default();
    data.extend(FIXED_HOLIDAYS.iter().filter_map(|&(month, day, name)| {
        NaiveDate::from_ymd_opt(year, month, day).map(|date| Holiday::new(name, date))
    }));
    if let Some(easter) = easter_sunday(year) {
        data.extend(MOVABLE_HOLIDAYS.iter().filter_map(|&(offset, name)| {
            add_days(easter, offset).map(|date| Holiday::new(name, date))
        }));
    }
    data.holidays
}

pub fn holiday_set(year: i32) -> BTreeSet<NaiveDate> {
    holidays_for(year).into_iter().map(|h| h.date).collect()
}

/// Union of the holiday sets of every year touched by `[start, end]`.
pub fn holiday_set_between(start: NaiveDate, end: NaiveDate) -> BTreeSet<NaiveDate> {
    years_spanned(start, end).flat_map(holiday_set).collect()
}

/// Named holidays of every year touched by `[start, end]`, restricted to the range.
pub fn holiday_data_between(start: NaiveDate, end: NaiveDate) -> HolidayData {
    let mut data = HolidayData::default();
    data.extend(
        years_spanned(start, end)
            .flat_map(holidays_for)
            .filter(|h| h.date >= start && h.date <= end),
    );
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_easter_known_dates() {
        assert_eq!(easter_sunday(2025), Some(d(2025, 4, 20)));
        assert_eq!(easter_sunday(2024), Some(d(2024, 3, 31)));
        assert_eq!(easter_sunday(2019), Some(d(2019, 4, 21)));
        assert_eq!(easter_sunday(2000), Some(d(2000, 4, 23)));
        assert_eq!(easter_sunday(1961), Some(d(1961, 4, 2)));
        assert_eq!(easter_sunday(2038), Some(d(2038, 4, 25)));
        // Earliest and latest possible dates
        assert_eq!(easter_sunday(1818), Some(d(1818, 3, 22)));
        assert_eq!(easter_sunday(1943), Some(d(1943, 4, 25)));
    }

    #[test]
    fn test_easter_is_always_sunday_in_window() {
        for year in 1583..=4099 {
            let easter = easter_sunday(year).unwrap();
            assert_eq!(easter.weekday(), Weekday::Sun, "year {year}");
            assert!(easter >= d(year, 3, 22) && easter <= d(year, 4, 25), "year {year}");
        }
    }

    #[test]
    fn test_easter_unrepresentable_year_is_none() {
        assert_eq!(easter_sunday(i32::MAX), None);
    }

    #[test]
    fn test_holidays_for_2025_movable() {
        let set = holiday_set(2025);
        assert!(set.contains(&d(2025, 4, 18))); // Good Friday
        assert!(set.contains(&d(2025, 4, 21))); // Easter Monday
        assert!(set.contains(&d(2025, 5, 29))); // Ascension
        assert!(set.contains(&d(2025, 6, 9))); // Whit Monday
        assert!(set.contains(&d(2025, 6, 19))); // Corpus Christi
        assert!(!set.contains(&d(2025, 4, 20))); // Easter Sunday itself is not listed
    }

    #[test]
    fn test_holidays_for_2025_fixed() {
        let set = holiday_set(2025);
        for (m, day) in [(1, 1), (1, 6), (5, 1), (10, 3), (11, 1), (12, 25), (12, 26)] {
            assert!(set.contains(&d(2025, m, day)), "{m}-{day}");
        }
        assert_eq!(set.len(), 12);
    }

    #[test]
    fn test_holidays_for_is_sorted_and_named() {
        let holidays = holidays_for(2026);
        assert!(holidays.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(holidays[0].name, "New Year's Day");
        assert_eq!(holidays.last().unwrap().name, "St. Stephen's Day");
        let good_friday = holidays.iter().find(|h| h.name == "Good Friday").unwrap();
        assert_eq!(good_friday.date, d(2026, 4, 3));
    }

    #[test]
    fn test_holidays_for_is_repeatable() {
        assert_eq!(holidays_for(2030), holidays_for(2030));
    }

    #[test]
    fn test_holiday_set_between_crosses_year_boundary() {
        let set = holiday_set_between(d(2025, 12, 20), d(2026, 1, 10));
        assert!(set.contains(&d(2025, 12, 25)));
        assert!(set.contains(&d(2026, 1, 1)));
        assert!(set.contains(&d(2026, 1, 6)));
        // Whole years are unioned, not clipped
        assert!(set.contains(&d(2026, 4, 3)));
    }

    #[test]
    fn test_holiday_set_between_reversed_is_empty() {
        assert!(holiday_set_between(d(2026, 1, 1), d(2025, 1, 1)).is_empty());
    }

    #[test]
    fn test_holiday_data_between_clips_to_range() {
        let data = holiday_data_between(d(2025, 12, 20), d(2026, 1, 2));
        let names: Vec<_> = data.holidays.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Christmas Day", "St. Stephen's Day", "New Year's Day"]
        );
    }
}
