use std::collections::HashSet;

use chrono::{Datelike, Local, NaiveDate, TimeZone, Utc};

use crate::components::TaskFormState;
use crate::planner::{
    day, FiredReminder, ReminderResult, ReminderScheduler, ScheduleOutcome, Task, TaskId, TaskStore,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Form,
    ConfirmDelete,
}

/// A dismissable message shown over the planner.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

pub struct App<Tz: TimeZone = Local> {
    pub running: bool,
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    pub day_tasks: Vec<Task>,
    pub days_with_tasks: HashSet<u32>,
    pub selected_index: usize,
    pub input_mode: InputMode,
    pub form_state: Option<TaskFormState>,
    pub pending_delete: Option<TaskId>,
    pub alert: Option<Alert>,
    pub status_message: Option<String>,
    pub show_help: bool,
    store: TaskStore<Tz>,
    reminders: ReminderScheduler,
}

impl<Tz: TimeZone> App<Tz> {
    pub fn new(store: TaskStore<Tz>, reminders: ReminderScheduler, today: NaiveDate) -> Self {
        let mut app = Self {
            running: true,
            selected_date: today,
            today,
            day_tasks: Vec::new(),
            days_with_tasks: HashSet::new(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            form_state: None,
            pending_delete: None,
            alert: None,
            status_message: None,
            show_help: false,
            store,
            reminders,
        };
        app.refresh_tasks();
        app
    }

    pub fn store(&self) -> &TaskStore<Tz> {
        &self.store
    }

    pub fn pending_reminders(&self) -> usize {
        self.reminders.pending_count()
    }

    /// Re-query the selected day and the month markers.
    pub fn refresh_tasks(&mut self) {
        self.day_tasks = self.store.tasks_on(self.selected_date);
        self.days_with_tasks = self
            .store
            .days_with_tasks(self.selected_date.year(), self.selected_date.month());
        self.selected_index = self.selected_index.min(self.day_tasks.len().saturating_sub(1));
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.day_tasks.get(self.selected_index)
    }

    fn set_date(&mut self, date: NaiveDate) {
        if date != self.selected_date {
            self.selected_date = date;
            self.selected_index = 0;
            self.refresh_tasks();
        }
    }

    pub fn next_day(&mut self) {
        self.set_date(self.selected_date.succ_opt().unwrap_or(self.selected_date));
    }

    pub fn prev_day(&mut self) {
        self.set_date(self.selected_date.pred_opt().unwrap_or(self.selected_date));
    }

    pub fn next_month(&mut self) {
        self.set_date(day::shift_months(self.selected_date, 1));
    }

    pub fn prev_month(&mut self) {
        self.set_date(day::shift_months(self.selected_date, -1));
    }

    pub fn go_to_today(&mut self) {
        self.today = day::calendar_day(&Utc::now(), self.store.timezone());
        self.set_date(self.today);
    }

    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.day_tasks.len() {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    // ── Form ──

    pub fn open_add_form(&mut self) {
        self.form_state = Some(TaskFormState::new(self.selected_date));
        self.input_mode = InputMode::Form;
    }

    pub fn open_edit_form(&mut self) {
        let Some(form) = self
            .selected_task()
            .map(|task| TaskFormState::edit(task, self.store.timezone()))
        else {
            return;
        };
        self.form_state = Some(form);
        self.input_mode = InputMode::Form;
    }

    pub fn close_form(&mut self) {
        self.form_state = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn form_mut(&mut self) -> Option<&mut TaskFormState> {
        self.form_state.as_mut()
    }

    /// Add or save from the open form. Does nothing while the title is
    /// empty; an unreadable date keeps the form open.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form_state.as_ref() else {
            return;
        };
        if !form.can_submit() {
            return;
        }

        let Some(date) = form.parsed_date() else {
            self.status_message = Some("Invalid date, use YYYY-MM-DD".to_string());
            return;
        };
        let Some(when) = day::instant_on(date, form.resolved_time(), self.store.timezone()) else {
            self.status_message = Some("That time does not exist on that date".to_string());
            return;
        };

        let form = form.clone();
        match form.editing {
            Some(id) => {
                let Some(mut task) = self.store.get(id).cloned() else {
                    self.close_form();
                    return;
                };
                task.time = form.time;
                task.title = form.title;
                task.date = when;
                self.store.update(task);
                self.status_message = Some("Task saved".to_string());
            }
            None => {
                let task = self.store.add(form.time, form.title, when);
                self.status_message = Some(format!(
                    "Added '{}' for {}",
                    task.title,
                    day::relative_label(date, self.today)
                ));
            }
        }

        self.close_form();
        self.refresh_tasks();
    }

    // ── Task actions ──

    pub fn toggle_selected_completion(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.store.toggle_completion(id);
            self.refresh_tasks();
        }
    }

    pub fn toggle_selected_reminder(&mut self) {
        let Some(id) = self.selected_task().map(|t| t.id) else {
            return;
        };

        match self.store.toggle_reminder(id) {
            ReminderResult::Schedule(request) => {
                let title = request.title.clone();
                let secs = request.delay.as_secs();
                self.alert = Some(match self.reminders.schedule(request) {
                    ScheduleOutcome::Scheduled => Alert::new(
                        "Reminder Set!",
                        format!(
                            "You'll be reminded about '{}' in {} second{}",
                            title,
                            secs,
                            if secs == 1 { "" } else { "s" }
                        ),
                    ),
                    ScheduleOutcome::Denied => Alert::new("Error", "Failed to set reminder"),
                });
            }
            ReminderResult::NoAction => {
                self.reminders.cancel(id);
            }
        }
        self.refresh_tasks();
    }

    pub fn request_delete(&mut self) {
        let target = match &self.form_state {
            Some(form) => form.editing,
            None => self.selected_task().map(|t| t.id),
        };
        if let Some(id) = target {
            self.pending_delete = Some(id);
            self.input_mode = InputMode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            self.store.delete(id);
            self.reminders.cancel(id);
            self.status_message = Some("Task deleted".to_string());
        }
        self.form_state = None;
        self.input_mode = InputMode::Normal;
        self.refresh_tasks();
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.input_mode = if self.form_state.is_some() {
            InputMode::Form
        } else {
            InputMode::Normal
        };
    }

    pub fn pending_delete_title(&self) -> Option<&str> {
        self.pending_delete
            .and_then(|id| self.store.get(id))
            .map(|t| t.title.as_str())
    }

    // ── Reminders ──

    pub fn on_reminder_fired(&mut self, fired: FiredReminder) {
        self.reminders.acknowledge(fired.task_id);
        tracing::info!(task = %fired.task_id, "reminder fired");
        self.alert = Some(Alert::new("\u{1F514} Task Reminder", fired.message));
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}
