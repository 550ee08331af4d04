use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::task::{Task, TaskId};

pub const DEFAULT_REMINDER_DELAY: Duration = Duration::from_secs(5);

/// Returned by [`TaskStore::toggle_reminder`](super::TaskStore::toggle_reminder).
#[derive(Debug, Clone, PartialEq)]
pub enum ReminderResult {
    /// The flag is now on; the caller should hand the request to a scheduler.
    Schedule(ReminderRequest),
    /// The flag is now off, or the id was unknown.
    NoAction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReminderRequest {
    pub task_id: TaskId,
    pub title: String,
    pub message: String,
    pub delay: Duration,
}

impl ReminderRequest {
    pub fn for_task(task: &Task, delay: Duration) -> Self {
        Self {
            task_id: task.id,
            title: task.title.clone(),
            message: format!("{}: {}", task.time_display(), task.title),
            delay,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FiredReminder {
    pub task_id: TaskId,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Scheduled,
    Denied,
}

/// Arms one tokio timer per task. Fired reminders are delivered on the
/// channel returned by [`ReminderScheduler::new`].
///
/// Must be used from within a tokio runtime.
pub struct ReminderScheduler {
    enabled: bool,
    tx: mpsc::UnboundedSender<FiredReminder>,
    pending: HashMap<TaskId, JoinHandle<()>>,
}

impl ReminderScheduler {
    pub fn new(enabled: bool) -> (Self, mpsc::UnboundedReceiver<FiredReminder>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            enabled,
            tx,
            pending: HashMap::new(),
        };
        (scheduler, rx)
    }

    pub fn schedule(&mut self, request: ReminderRequest) -> ScheduleOutcome {
        if !self.enabled {
            tracing::warn!(task = %request.task_id, "notifications disabled, reminder not scheduled");
            return ScheduleOutcome::Denied;
        }

        self.cancel(request.task_id);

        let tx = self.tx.clone();
        let task_id = request.task_id;
        let delay = request.delay;
        let message = request.message;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the UI has shut down.
            let _ = tx.send(FiredReminder { task_id, message });
        });

        tracing::info!(task = %task_id, delay_secs = delay.as_secs(), "reminder scheduled");
        self.pending.insert(task_id, handle);
        ScheduleOutcome::Scheduled
    }

    /// Abort the pending timer for `task_id`. Returns whether one was armed.
    pub fn cancel(&mut self, task_id: TaskId) -> bool {
        match self.pending.remove(&task_id) {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                tracing::debug!(task = %task_id, "reminder cancelled");
                true
            }
            _ => false,
        }
    }

    /// Forget the handle of a reminder that has been delivered.
    pub fn acknowledge(&mut self, task_id: TaskId) {
        self.pending.remove(&task_id);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.values().filter(|h| !h.is_finished()).count()
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}
