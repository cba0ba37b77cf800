use crate::calc::workday::chargeable_days;
use crate::data::WorkDaySet;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt;

/// Anything a user can click on in a calendar grid. Ordering decides which
/// click is "earlier"; `day()` is what gets checked against locked days.
pub trait SelectionKey: Copy + Ord + fmt::Debug + 'static {
    fn day(&self) -> NaiveDate;
}

impl SelectionKey for NaiveDate {
    fn day(&self) -> NaiveDate {
        *self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionState<K> {
    Empty,
    Partial { start: K },
    Complete { start: K, end: K },
}

impl<K: SelectionKey> SelectionState<K> {
    pub fn start(&self) -> Option<K> {
        match *self {
            SelectionState::Empty => None,
            SelectionState::Partial { start } | SelectionState::Complete { start, .. } => {
                Some(start)
            }
        }
    }

    pub fn end(&self) -> Option<K> {
        match *self {
            SelectionState::Complete { end, .. } => Some(end),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome<K> {
    /// The click moved the machine; carries the new state.
    Accepted(SelectionState<K>),
    /// The clicked key is on a locked day; nothing changed.
    Ignored,
    /// The range from the current start to the clicked key would cover a
    /// locked day; nothing changed.
    Blocked { first_locked: NaiveDate },
}

/// Read-only snapshot of a selection, as handed to the day counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection<K> {
    pub start: Option<K>,
    pub end: Option<K>,
    pub start_half: bool,
    pub end_half: bool,
}

impl<K: SelectionKey> Selection<K> {
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// `(start_day, end_day)` of a complete selection.
    pub fn days(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start?.day(), self.end?.day()))
    }

    /// Chargeable leave days for a complete selection, 0 otherwise.
    pub fn chargeable_days(&self, work_days: &WorkDaySet) -> f64 {
        match self.days() {
            Some((start, end)) => {
                chargeable_days(start, end, work_days, self.start_half, self.end_half)
            }
            None => 0.0,
        }
    }
}

/// Receives selection changes from a [`RangeSelector`].
pub trait SelectionListener<K> {
    /// Called after every accepted transition; `end` is `None` while partial.
    fn on_change(&mut self, start: Option<K>, end: Option<K>);

    /// Called when a range was refused because it would cover a locked day.
    fn on_blocked(&mut self, _attempted: K, _first_locked: NaiveDate) {}
}

impl<K, F> SelectionListener<K> for F
where
    F: FnMut(Option<K>, Option<K>),
{
    fn on_change(&mut self, start: Option<K>, end: Option<K>) {
        self(start, end)
    }
}

/// Click-driven start/end picker that refuses ranges touching locked days.
///
/// `Empty -> Partial -> Complete -> Partial -> ...`; there is no terminal
/// state. Owned by a single view and driven one click at a time.
pub struct RangeSelector<K: SelectionKey> {
    state: SelectionState<K>,
    start_half: bool,
    end_half: bool,
    listener: Option<Box<dyn SelectionListener<K>>>,
}

impl<K: SelectionKey> Default for RangeSelector<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: SelectionKey> fmt::Debug for RangeSelector<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSelector")
            .field("state", &self.state)
            .field("start_half", &self.start_half)
            .field("end_half", &self.end_half)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl<K: SelectionKey> RangeSelector<K> {
    pub fn new() -> Self {
        RangeSelector {
            state: SelectionState::Empty,
            start_half: false,
            end_half: false,
            listener: None,
        }
    }

    pub fn with_listener(listener: impl SelectionListener<K> + 'static) -> Self {
        let mut selector = Self::new();
        selector.set_listener(listener);
        selector
    }

    pub fn set_listener(&mut self, listener: impl SelectionListener<K> + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn state(&self) -> SelectionState<K> {
        self.state
    }

    pub fn selection(&self) -> Selection<K> {
        Selection {
            start: self.state.start(),
            end: self.state.end(),
            start_half: self.start_half,
            end_half: self.end_half,
        }
    }

    /// Feeds one click into the machine.
    pub fn click(&mut self, key: K, locked: &BTreeSet<NaiveDate>) -> ClickOutcome<K> {
        if locked.contains(&key.day()) {
            tracing::debug!(?key, "click on locked day ignored");
            return ClickOutcome::Ignored;
        }

        let next = match self.state {
            SelectionState::Empty | SelectionState::Complete { .. } => {
                SelectionState::Partial { start: key }
            }
            SelectionState::Partial { start } if key < start => SelectionState::Partial { start: key },
            SelectionState::Partial { start } if key == start => {
                SelectionState::Complete { start, end: key }
            }
            SelectionState::Partial { start } => {
                if let Some(&first_locked) = locked.range(start.day()..=key.day()).next() {
                    tracing::debug!(?start, ?key, %first_locked, "range blocked by locked day");
                    if let Some(listener) = self.listener.as_mut() {
                        listener.on_blocked(key, first_locked);
                    }
                    return ClickOutcome::Blocked { first_locked };
                }
                SelectionState::Complete { start, end: key }
            }
        };

        if let SelectionState::Partial { .. } = next {
            self.start_half = false;
            self.end_half = false;
        }
        self.transition(next);
        ClickOutcome::Accepted(next)
    }

    /// Marks the start day as a half day. Needs a start.
    pub fn set_start_half(&mut self, half: bool) -> bool {
        if self.state.start().is_none() {
            return false;
        }
        self.start_half = half;
        true
    }

    /// Marks the end day as a half day. Needs a complete range.
    pub fn set_end_half(&mut self, half: bool) -> bool {
        if self.state.end().is_none() {
            return false;
        }
        self.end_half = half;
        true
    }

    pub fn start_half(&self) -> bool {
        self.start_half
    }

    pub fn end_half(&self) -> bool {
        self.end_half
    }

    /// Drops the current selection, e.g. after a request was submitted.
    pub fn clear(&mut self) {
        self.start_half = false;
        self.end_half = false;
        self.transition(SelectionState::Empty);
    }

    fn transition(&mut self, next: SelectionState<K>) {
        tracing::debug!(from = ?self.state, to = ?next, "selection transition");
        self.state = next;
        if let Some(listener) = self.listener.as_mut() {
            listener.on_change(next.start(), next.end());
        }
    }
}
