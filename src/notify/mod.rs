pub mod activity_log;
pub mod notify;

pub use activity_log::ActivityLog;
pub use notify::ModeNotifier;
