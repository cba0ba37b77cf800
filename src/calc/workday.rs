use crate::calc::dates::days_inclusive;
use crate::calc::holiday_calc::{holiday_data_between, holiday_set_between};
use crate::data::WorkDaySet;
use chrono::NaiveDate;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Workday {
    pub date: NaiveDate,
    /// A regular working day that is not a holiday.
    pub is_workday: bool,
    pub is_holiday: bool,
    pub holiday_name: Option<String>,
}

/// Per-day breakdown of `[start, end]`. Empty when `end < start`.
pub fn classify_days(start: NaiveDate, end: NaiveDate, work_days: &WorkDaySet) -> Vec<Workday> {
    let holidays = holiday_data_between(start, end);
    let holiday_map = holidays.get_holiday_map();
    days_inclusive(start, end)
        .map(|date| {
            let holiday_name = holiday_map.get(&date).map(|h| h.name.clone());
            Workday {
                date,
                is_workday: holiday_name.is_none() && work_days.works_on(date),
                is_holiday: holiday_name.is_some(),
                holiday_name,
            }
        })
        .collect()
}

/// Number of leave days a request for `[start, end]` consumes.
///
/// Counts the working weekdays in the range that are not holidays, then takes
/// half a day off each boundary flagged as a half day. A single-day request
/// with either half flag set is always worth 0.5, and a half-day flagged
/// total that falls to zero or below is clamped to 0.5. Returns 0 when
/// `end < start` or when `work_days` is empty, whatever the half flags.
pub fn chargeable_days(
    start: NaiveDate,
    end: NaiveDate,
    work_days: &WorkDaySet,
    start_half: bool,
    end_half: bool,
) -> f64 {
    if end < start || work_days.is_empty() {
        return 0.0;
    }

    let holidays = holiday_set_between(start, end);
    let counts = |d: &NaiveDate| work_days.works_on(*d) && !holidays.contains(d);

    let mut total = days_inclusive(start, end).filter(counts).count() as f64;

    if start == end {
        return if start_half || end_half { 0.5 } else { total };
    }

    if start_half && counts(&start) {
        total -= 0.5;
    }
    if end_half && counts(&end) {
        total -= 0.5;
    }

    if (start_half || end_half) && total <= 0.0 {
        // Assumed rule: a half-day request never reports zero.
        return 0.5;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn mon_fri() -> WorkDaySet {
        WorkDaySet::mon_fri()
    }

    #[test]
    fn test_reversed_range_is_zero() {
        assert_eq!(chargeable_days(d(2025, 12, 5), d(2025, 12, 1), &mon_fri(), false, false), 0.0);
        assert_eq!(chargeable_days(d(2025, 12, 5), d(2025, 12, 4), &mon_fri(), true, true), 0.0);
    }

    #[test]
    fn test_single_weekday_is_one() {
        // 2025-12-02 is a Tuesday
        assert_eq!(chargeable_days(d(2025, 12, 2), d(2025, 12, 2), &mon_fri(), false, false), 1.0);
    }

    #[test]
    fn test_single_weekend_day_is_zero() {
        assert_eq!(chargeable_days(d(2025, 12, 6), d(2025, 12, 6), &mon_fri(), false, false), 0.0);
        assert_eq!(chargeable_days(d(2025, 12, 7), d(2025, 12, 7), &mon_fri(), false, false), 0.0);
    }

    #[test]
    fn test_single_holiday_is_zero() {
        // Good Friday 2025
        assert_eq!(chargeable_days(d(2025, 4, 18), d(2025, 4, 18), &mon_fri(), false, false), 0.0);
    }

    #[test]
    fn test_single_day_half_is_half_even_on_weekend() {
        assert_eq!(chargeable_days(d(2025, 12, 2), d(2025, 12, 2), &mon_fri(), true, false), 0.5);
        assert_eq!(chargeable_days(d(2025, 12, 2), d(2025, 12, 2), &mon_fri(), false, true), 0.5);
        assert_eq!(chargeable_days(d(2025, 12, 6), d(2025, 12, 6), &mon_fri(), true, true), 0.5);
    }

    #[test]
    fn test_half_day_start() {
        assert_eq!(chargeable_days(d(2025, 12, 1), d(2025, 12, 3), &mon_fri(), true, false), 2.5);
    }

    #[test]
    fn test_half_day_both_ends() {
        assert_eq!(chargeable_days(d(2025, 12, 1), d(2025, 12, 5), &mon_fri(), true, true), 4.0);
    }

    #[test]
    fn test_half_flag_on_weekend_boundary_is_ignored() {
        // Sat 2025-12-06 .. Wed 2025-12-10: Mon-Wed count, Saturday half flag has no effect
        assert_eq!(chargeable_days(d(2025, 12, 6), d(2025, 12, 10), &mon_fri(), true, false), 3.0);
    }

    #[test]
    fn test_full_week_skips_weekend() {
        assert_eq!(chargeable_days(d(2025, 12, 1), d(2025, 12, 14), &mon_fri(), false, false), 10.0);
    }

    #[test]
    fn test_christmas_span_across_year_boundary() {
        // Mon 2025-12-22 .. Fri 2026-01-09:
        // weekdays = 15; minus 25th, 26th, Jan 1st, Jan 6th = 11
        assert_eq!(chargeable_days(d(2025, 12, 22), d(2026, 1, 9), &mon_fri(), false, false), 11.0);
    }

    #[test]
    fn test_easter_week() {
        // Mon 2025-04-14 .. Mon 2025-04-21: 6 weekdays minus Good Friday and Easter Monday
        assert_eq!(chargeable_days(d(2025, 4, 14), d(2025, 4, 21), &mon_fri(), false, false), 4.0);
    }

    #[test]
    fn test_empty_work_days_is_zero_without_halves() {
        let none = WorkDaySet::empty();
        assert_eq!(chargeable_days(d(2025, 12, 1), d(2025, 12, 31), &none, false, false), 0.0);
        assert_eq!(chargeable_days(d(2025, 12, 1), d(2025, 12, 1), &none, false, false), 0.0);
    }

    #[test]
    fn test_clamp_to_half_when_adjusted_total_is_zero() {
        // Fri 2025-12-05 .. Mon 2025-12-08 with both halves: 2 - 1 = 0 -> clamped
        assert_eq!(chargeable_days(d(2025, 12, 5), d(2025, 12, 8), &mon_fri(), true, true), 0.5);
    }

    #[test]
    fn test_weekend_only_range_is_zero() {
        assert_eq!(chargeable_days(d(2025, 12, 6), d(2025, 12, 7), &mon_fri(), false, false), 0.0);
    }

    #[test]
    fn test_weekend_only_range_with_half_flag_is_clamped() {
        assert_eq!(chargeable_days(d(2025, 12, 6), d(2025, 12, 7), &mon_fri(), true, false), 0.5);
    }

    #[test]
    fn test_custom_work_pattern() {
        let set: WorkDaySet = [Weekday::Mon, Weekday::Wed].into_iter().collect();
        // 2025-12-01 (Mon) .. 2025-12-07 (Sun) => Mon + Wed
        assert_eq!(chargeable_days(d(2025, 12, 1), d(2025, 12, 7), &set, false, false), 2.0);
        // Tuesday start half flag does nothing: Tuesday is not counted
        assert_eq!(chargeable_days(d(2025, 12, 2), d(2025, 12, 7), &set, true, false), 1.0);
    }

    #[test]
    fn test_empty_work_days_is_zero_even_with_half_flags() {
        let none = WorkDaySet::empty();
        assert_eq!(chargeable_days(d(2025, 12, 2), d(2025, 12, 2), &none, true, false), 0.0);
        assert_eq!(chargeable_days(d(2025, 12, 1), d(2025, 12, 5), &none, true, true), 0.0);
        assert_eq!(chargeable_days(d(2025, 12, 1), d(2025, 12, 5), &none, false, false), 0.0);
    }

    #[test]
    fn test_result_is_stable() {
        let a = chargeable_days(d(2025, 5, 26), d(2025, 6, 13), &mon_fri(), true, true);
        let b = chargeable_days(d(2025, 5, 26), d(2025, 6, 13), &mon_fri(), true, true);
        assert_eq!(a, b);
    }

    #[test]
    fn test_classify_days_marks_holidays() {
        let days = classify_days(d(2025, 12, 24), d(2025, 12, 28), &mon_fri());
        assert_eq!(days.len(), 5);
        assert!(days[0].is_workday);
        assert!(days[1].is_holiday);
        assert_eq!(days[1].holiday_name.as_deref(), Some("Christmas Day"));
        assert!(!days[1].is_workday);
        assert!(days[2].is_holiday);
        assert!(!days[3].is_workday && !days[3].is_holiday); // Saturday
    }

    #[test]
    fn test_classify_days_reversed_is_empty() {
        assert!(classify_days(d(2025, 12, 2), d(2025, 12, 1), &mon_fri()).is_empty());
    }
}
