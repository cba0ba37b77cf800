pub mod dates;
pub mod event_expand;
pub mod grid;
pub mod holiday_calc;
pub mod leave_check;
pub mod workday;

pub use dates::{add_days, days_inclusive, iso, parse_iso};
pub use event_expand::{DisplayEvent, events_on, expand};
pub use grid::{GridCell, month_grid, week_of};
pub use holiday_calc::{easter_sunday, holiday_set, holiday_set_between, holidays_for};
pub use leave_check::{LeavePreview, check_request};
pub use workday::{Workday, chargeable_days, classify_days};
