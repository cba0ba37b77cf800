//! Calendar range selection and leave-day accounting.
//!
//! `calc` holds the pure calendar arithmetic (holidays, grids, chargeable
//! days, event expansion), `select` the click-driven range picker, and `data`
//! the typed records loaded from the data directory.

pub mod calc;
pub mod data;
pub mod error;
pub mod select;

pub use error::CalendarError;
