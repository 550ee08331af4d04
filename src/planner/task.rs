use std::fmt;

use chrono::{DateTime, Utc};

/// Identifier handed out by a [`TaskStore`](super::TaskStore). Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub(crate) u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub time: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub is_completed: bool,
    pub has_reminder: bool,
}

impl Task {
    pub(crate) fn new(id: TaskId, time: String, title: String, date: DateTime<Utc>) -> Self {
        Self {
            id,
            time,
            title,
            date,
            is_completed: false,
            has_reminder: false,
        }
    }

    /// Label used in reminder messages; untimed tasks read as "Task".
    pub fn time_display(&self) -> &str {
        if self.time.is_empty() {
            "Task"
        } else {
            &self.time
        }
    }
}
