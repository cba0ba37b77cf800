pub mod machine;
pub mod slot;

pub use machine::{
    ClickOutcome, RangeSelector, Selection, SelectionKey, SelectionListener, SelectionState,
};
pub use slot::{SlotKey, week_slots};
