use crate::calc::dates::iso;
use crate::calc::grid::week_of;
use crate::select::machine::SelectionKey;
use chrono::NaiveDate;
use std::fmt;

/// A cell of the week view: a day plus an hour row, or the day's all-day lane
/// (`hour == None`). Ordered by day, then hour, with the all-day lane first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    pub day: NaiveDate,
    pub hour: Option<u8>,
}

impl SlotKey {
    pub fn all_day(day: NaiveDate) -> Self {
        SlotKey { day, hour: None }
    }

    pub fn at(day: NaiveDate, hour: u8) -> Self {
        SlotKey {
            day,
            hour: Some(hour),
        }
    }

    pub fn is_all_day(&self) -> bool {
        self.hour.is_none()
    }
}

impl SelectionKey for SlotKey {
    fn day(&self) -> NaiveDate {
        self.day
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hour {
            Some(h) => write!(f, "{} {:02}:00", iso(self.day), h),
            None => write!(f, "{} (all day)", iso(self.day)),
        }
    }
}

/// Every slot of the Monday-first week containing `date`, in chronological
/// order: per day the all-day lane followed by each hour in `hours`.
pub fn week_slots(date: NaiveDate, hours: std::ops::RangeInclusive<u8>) -> Vec<SlotKey> {
    week_of(date)
        .into_iter()
        .flat_map(|day| {
            std::iter::once(SlotKey::all_day(day))
                .chain(hours.clone().map(move |h| SlotKey::at(day, h)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::{ClickOutcome, RangeSelector, SelectionState};
    use std::collections::BTreeSet;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_ordering_day_then_hour() {
        let a = SlotKey::at(d(2025, 12, 1), 17);
        let b = SlotKey::at(d(2025, 12, 2), 8);
        assert!(a < b);
        assert!(SlotKey::at(d(2025, 12, 1), 8) < SlotKey::at(d(2025, 12, 1), 9));
    }

    #[test]
    fn test_all_day_lane_sorts_before_hours() {
        let all_day = SlotKey::all_day(d(2025, 12, 1));
        assert!(all_day < SlotKey::at(d(2025, 12, 1), 0));
        assert!(SlotKey::at(d(2025, 11, 30), 23) < all_day);
    }

    #[test]
    fn test_display() {
        assert_eq!(SlotKey::at(d(2025, 12, 1), 9).to_string(), "2025-12-01 09:00");
        assert_eq!(SlotKey::all_day(d(2025, 12, 1)).to_string(), "2025-12-01 (all day)");
    }

    #[test]
    fn test_week_slots_are_sorted_and_sized() {
        let slots = week_slots(d(2025, 12, 3), 8..=17);
        assert_eq!(slots.len(), 7 * 11);
        assert_eq!(slots[0], SlotKey::all_day(d(2025, 12, 1)));
        assert_eq!(slots[1], SlotKey::at(d(2025, 12, 1), 8));
        assert!(slots.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(*slots.last().unwrap(), SlotKey::at(d(2025, 12, 7), 17));
    }

    #[test]
    fn test_slot_selection_earlier_hour_same_day_restarts() {
        let locks = BTreeSet::new();
        let mut sel = RangeSelector::new();
        sel.click(SlotKey::at(d(2025, 12, 2), 14), &locks);
        sel.click(SlotKey::at(d(2025, 12, 2), 9), &locks);
        assert_eq!(
            sel.state(),
            SelectionState::Partial {
                start: SlotKey::at(d(2025, 12, 2), 9)
            }
        );
    }

    #[test]
    fn test_slot_selection_all_day_lane_is_earlier() {
        let locks = BTreeSet::new();
        let mut sel = RangeSelector::new();
        sel.click(SlotKey::at(d(2025, 12, 2), 9), &locks);
        sel.click(SlotKey::all_day(d(2025, 12, 2)), &locks);
        assert_eq!(
            sel.state(),
            SelectionState::Partial {
                start: SlotKey::all_day(d(2025, 12, 2))
            }
        );
    }

    #[test]
    fn test_slot_selection_completes_across_days() {
        let locks = BTreeSet::new();
        let mut sel = RangeSelector::new();
        sel.click(SlotKey::at(d(2025, 12, 2), 13), &locks);
        sel.click(SlotKey::at(d(2025, 12, 4), 10), &locks);
        let s = sel.selection();
        assert_eq!(s.days(), Some((d(2025, 12, 2), d(2025, 12, 4))));
    }

    #[test]
    fn test_slot_selection_blocked_by_locked_day() {
        let locks: BTreeSet<_> = [d(2025, 12, 3)].into_iter().collect();
        let mut sel = RangeSelector::new();
        sel.click(SlotKey::at(d(2025, 12, 2), 13), &locks);
        assert_eq!(
            sel.click(SlotKey::at(d(2025, 12, 4), 10), &locks),
            ClickOutcome::Blocked {
                first_locked: d(2025, 12, 3)
            }
        );
        assert_eq!(
            sel.click(SlotKey::at(d(2025, 12, 3), 10), &locks),
            ClickOutcome::Ignored
        );
    }
}
