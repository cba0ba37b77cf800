pub mod count;
pub mod events;
pub mod holidays;
pub mod init;
pub mod leave;
pub mod month;
pub mod root;
