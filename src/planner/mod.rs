pub mod day;
pub mod reminder;
pub mod store;
pub mod task;

pub use reminder::{FiredReminder, ReminderRequest, ReminderResult, ReminderScheduler, ScheduleOutcome};
pub use store::TaskStore;
pub use task::{Task, TaskId};
