pub mod app_settings;
pub mod employee;
pub mod event;
pub mod holiday;
pub mod leave;
pub mod persistence;

pub use app_settings::{AppSettings, ConfigFile};
pub use employee::{Employee, WorkDaySet};
pub use event::{Event, EventData};
pub use holiday::{Holiday, HolidayData};
pub use leave::{LeaveData, LeaveRequest, LeaveStatus};
pub use persistence::Persistable;
