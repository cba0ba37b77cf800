use crate::calc::dates::days_inclusive;
use crate::data::Event;
use chrono::NaiveDate;
use serde::Serialize;

/// One calendar day's view of an event.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DisplayEvent {
    #[serde(flatten)]
    pub event: Event,
    pub display_date: NaiveDate,
    pub is_multi_day: bool,
    pub is_first_day: bool,
    pub is_last_day: bool,
}

/// Expands all-day events spanning several days into one record per day.
///
/// Records for one source event come out in day order. Timed events and
/// single-day events produce exactly one record on their start date.
pub fn expand(events: &[Event]) -> Vec<DisplayEvent> {
    let mut out = Vec::with_capacity(events.len());
    for event in events {
        let last = event.last_date();
        if event.is_all_day && last != event.start_date {
            out.extend(
                days_inclusive(event.start_date, last).map(|day| DisplayEvent {
                    event: event.clone(),
                    display_date: day,
                    is_multi_day: true,
                    is_first_day: day == event.start_date,
                    is_last_day: day == last,
                }),
            );
        } else {
            out.push(DisplayEvent {
                event: event.clone(),
                display_date: event.start_date,
                is_multi_day: false,
                is_first_day: true,
                is_last_day: true,
            });
        }
    }
    out
}

/// Expanded records shown on `day`.
pub fn events_on(display: &[DisplayEvent], day: NaiveDate) -> Vec<&DisplayEvent> {
    display.iter().filter(|e| e.display_date == day).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_expand_multi_day_all_day_event() {
        let events = vec![Event::all_day("Offsite", d(2025, 3, 30), d(2025, 4, 2))];
        let out = expand(&events);
        assert_eq!(out.len(), 4);
        let dates: Vec<_> = out.iter().map(|e| e.display_date).collect();
        assert_eq!(
            dates,
            vec![d(2025, 3, 30), d(2025, 3, 31), d(2025, 4, 1), d(2025, 4, 2)]
        );
        assert!(out.iter().all(|e| e.is_multi_day));
        assert!(out[0].is_first_day && !out[0].is_last_day);
        assert!(!out[1].is_first_day && !out[1].is_last_day);
        assert!(!out[2].is_first_day && !out[2].is_last_day);
        assert!(!out[3].is_first_day && out[3].is_last_day);
        assert!(out.iter().all(|e| e.event.title == "Offsite"));
    }

    #[test]
    fn test_expand_n_day_event_yields_n_records() {
        for n in 2..=10u64 {
            let start = d(2025, 12, 28);
            let end = start + chrono::Days::new(n - 1);
            let out = expand(&[Event::all_day("Span", start, end)]);
            assert_eq!(out.len() as u64, n);
            assert_eq!(out.iter().filter(|e| e.is_first_day).count(), 1);
            assert_eq!(out.iter().filter(|e| e.is_last_day).count(), 1);
        }
    }

    #[test]
    fn test_expand_single_day_event_not_multi() {
        let out = expand(&[Event::all_day("Holiday party", d(2025, 12, 19), d(2025, 12, 19))]);
        assert_eq!(out.len(), 1);
        assert!(!out[0].is_multi_day);
        assert!(out[0].is_first_day && out[0].is_last_day);
        assert_eq!(out[0].display_date, d(2025, 12, 19));
    }

    #[test]
    fn test_expand_timed_event_spanning_days_is_not_expanded() {
        let mut e = Event::timed(
            "Night shift",
            d(2025, 12, 1),
            NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        );
        e.end_date = Some(d(2025, 12, 2));
        let out = expand(&[e]);
        assert_eq!(out.len(), 1);
        assert!(!out[0].is_multi_day);
        assert_eq!(out[0].display_date, d(2025, 12, 1));
    }

    #[test]
    fn test_expand_event_with_end_before_start_is_single() {
        let out = expand(&[Event::all_day("Typo", d(2025, 5, 10), d(2025, 5, 8))]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].display_date, d(2025, 5, 10));
    }

    #[test]
    fn test_expand_preserves_source_order() {
        let events = vec![
            Event::all_day("B", d(2025, 6, 2), d(2025, 6, 3)),
            Event::all_day("A", d(2025, 6, 1), d(2025, 6, 1)),
        ];
        let titles: Vec<_> = expand(&events).into_iter().map(|e| e.event.title).collect();
        assert_eq!(titles, vec!["B", "B", "A"]);
    }

    #[test]
    fn test_events_on_filters_by_day() {
        let display = expand(&[
            Event::all_day("Offsite", d(2025, 3, 30), d(2025, 4, 2)),
            Event::all_day("Review", d(2025, 4, 1), d(2025, 4, 1)),
        ]);
        let on_first = events_on(&display, d(2025, 4, 1));
        assert_eq!(on_first.len(), 2);
        assert!(events_on(&display, d(2025, 4, 3)).is_empty());
    }

    #[test]
    fn test_display_event_serializes_flat() {
        let out = expand(&[Event::all_day("Offsite", d(2025, 3, 30), d(2025, 3, 31))]);
        let json = serde_json::to_value(&out[1]).unwrap();
        assert_eq!(json["title"], "Offsite");
        assert_eq!(json["display_date"], "2025-03-31");
        assert_eq!(json["is_last_day"], true);
    }

    #[test]
    fn test_expand_empty() {
        assert!(expand(&[]).is_empty());
    }
}
