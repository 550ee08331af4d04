use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, TimeZone, Utc};

use super::day;
use super::reminder::{ReminderRequest, ReminderResult, DEFAULT_REMINDER_DELAY};
use super::task::{Task, TaskId};

/// In-memory owner of every task. Calendar-day queries are answered in the
/// store's timezone (`Local` unless injected).
///
/// Operations on unknown ids are silently ignored.
#[derive(Debug, Clone)]
pub struct TaskStore<Tz: TimeZone = Local> {
    tasks: Vec<Task>,
    next_id: u64,
    tz: Tz,
    reminder_delay: Duration,
}

impl TaskStore<Local> {
    pub fn new() -> Self {
        Self::with_timezone(Local)
    }
}

impl Default for TaskStore<Local> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone> TaskStore<Tz> {
    pub fn with_timezone(tz: Tz) -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
            tz,
            reminder_delay: DEFAULT_REMINDER_DELAY,
        }
    }

    pub fn with_reminder_delay(mut self, delay: Duration) -> Self {
        self.reminder_delay = delay;
        self
    }

    /// Seed the starter tasks shown on first launch, all dated `today`.
    pub fn with_sample_tasks(mut self, today: NaiveDate) -> Self {
        let samples = [
            ("5:00am", "Sam workout"),
            ("8:00am", "Business Deep Work"),
            ("", "Post Post Workout Routine"),
            ("10:00am", "Dentist"),
        ];
        for (time, title) in samples {
            // Untimed samples sit between the morning blocks.
            let at = day::parse_time_label(time)
                .or_else(|| NaiveTime::from_hms_opt(9, 0, 0))
                .and_then(|t| day::instant_on(today, t, &self.tz));
            if let Some(at) = at {
                self.add(time, title, at);
            }
        }
        self
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    pub fn reminder_delay(&self) -> Duration {
        self.reminder_delay
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn add(&mut self, time: impl Into<String>, title: impl Into<String>, date: DateTime<Utc>) -> Task {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        let task = Task::new(id, time.into(), title.into(), date);
        tracing::debug!(task = %id, title = %task.title, "task added");
        self.tasks.push(task.clone());
        task
    }

    /// Replace the stored task carrying `task.id`.
    pub fn update(&mut self, task: Task) {
        match self.get_mut(task.id) {
            Some(slot) => {
                tracing::debug!(task = %task.id, "task updated");
                *slot = task;
            }
            None => tracing::trace!(task = %task.id, "update ignored, no such task"),
        }
    }

    pub fn delete(&mut self, id: TaskId) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            tracing::debug!(task = %id, "task deleted");
        }
    }

    pub fn toggle_completion(&mut self, id: TaskId) {
        if let Some(task) = self.get_mut(id) {
            task.is_completed = !task.is_completed;
        }
    }

    pub fn toggle_reminder(&mut self, id: TaskId) -> ReminderResult {
        let delay = self.reminder_delay;
        let Some(task) = self.get_mut(id) else {
            return ReminderResult::NoAction;
        };

        task.has_reminder = !task.has_reminder;
        if task.has_reminder {
            ReminderResult::Schedule(ReminderRequest::for_task(task, delay))
        } else {
            ReminderResult::NoAction
        }
    }

    /// Tasks on the same calendar day as `date`, earliest first. Tasks with
    /// identical instants keep insertion order.
    pub fn tasks_for(&self, date: DateTime<Utc>) -> Vec<Task> {
        self.tasks_on(day::calendar_day(&date, &self.tz))
    }

    pub fn tasks_on(&self, date: NaiveDate) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| day::calendar_day(&t.date, &self.tz) == date)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.date);
        tasks
    }

    /// Day-of-month numbers in `year`/`month` that have at least one task.
    pub fn days_with_tasks(&self, year: i32, month: u32) -> HashSet<u32> {
        self.tasks
            .iter()
            .map(|t| day::calendar_day(&t.date, &self.tz))
            .filter(|d| d.year() == year && d.month() == month)
            .map(|d| d.day())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, FixedOffset};

    fn store() -> TaskStore<Utc> {
        TaskStore::with_timezone(Utc)
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn added_task_is_returned_for_its_day_only() {
        let mut store = store();
        let task = store.add("9:00 AM", "Dentist", at(2024, 5, 1, 9));

        let same_day = store.tasks_for(at(2024, 5, 1, 0));
        assert_eq!(same_day, vec![task.clone()]);
        assert_eq!(same_day[0].time, "9:00 AM");
        assert!(!same_day[0].is_completed);
        assert!(!same_day[0].has_reminder);

        assert!(store.tasks_for(at(2024, 5, 2, 0)).is_empty());
    }

    #[test]
    fn ids_are_unique_and_not_reused() {
        let mut store = store();
        let a = store.add("", "A", at(2024, 5, 1, 1));
        let b = store.add("", "B", at(2024, 5, 1, 2));
        assert_ne!(a.id, b.id);

        store.delete(b.id);
        let c = store.add("", "C", at(2024, 5, 1, 3));
        assert_ne!(c.id, b.id);
        assert_ne!(c.id, a.id);
    }

    #[test]
    fn filter_never_leaks_other_days() {
        let mut store = store();
        let base = at(2024, 5, 1, 0);
        for hours in [-1i64, 0, 5, 23, 24, 47] {
            store.add("", format!("h{hours}"), base + ChronoDuration::hours(hours));
        }

        let found = store.tasks_for(base + ChronoDuration::hours(12));
        assert_eq!(titles(&found), ["h0", "h5", "h23"]);
        for task in &found {
            assert!(day::same_calendar_day(&task.date, &base, &Utc));
        }
    }

    #[test]
    fn sorted_by_full_instant() {
        let mut store = store();
        store.add("", "third", at(2024, 5, 1, 3));
        store.add("", "first", at(2024, 5, 1, 1));
        store.add("", "second", at(2024, 5, 1, 2));

        assert_eq!(titles(&store.tasks_for(at(2024, 5, 1, 0))), ["first", "second", "third"]);
    }

    #[test]
    fn identical_instants_keep_insertion_order() {
        let mut store = store();
        let when = at(2024, 5, 1, 9);
        store.add("", "A", when);
        store.add("", "B", when);
        store.add("", "C", when);

        assert_eq!(titles(&store.tasks_for(when)), ["A", "B", "C"]);
    }

    #[test]
    fn morning_tasks_come_out_in_time_order() {
        let mut store = store();
        store.add("5:00am", "A", at(2024, 5, 1, 5));
        store.add("8:00am", "B", at(2024, 5, 1, 8));

        assert_eq!(titles(&store.tasks_for(at(2024, 5, 1, 12))), ["A", "B"]);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = store();
        let keep = store.add("", "keep", at(2024, 5, 1, 1));
        let gone = store.add("", "gone", at(2024, 5, 1, 2));

        store.delete(gone.id);
        let after_first = store.tasks_for(at(2024, 5, 1, 0));
        store.delete(gone.id);
        let after_second = store.tasks_for(at(2024, 5, 1, 0));

        assert_eq!(after_first, after_second);
        assert_eq!(after_second, vec![keep]);
    }

    #[test]
    fn update_replaces_matching_entry() {
        let mut store = store();
        let mut task = store.add("9:00 AM", "Dentist", at(2024, 5, 1, 9));
        task.title = "Orthodontist".to_string();
        task.date = at(2024, 5, 3, 9);
        store.update(task.clone());

        assert!(store.tasks_for(at(2024, 5, 1, 0)).is_empty());
        assert_eq!(store.tasks_for(at(2024, 5, 3, 0)), vec![task]);
    }

    #[test]
    fn update_of_unknown_id_is_ignored() {
        let mut store = store();
        let task = store.add("", "A", at(2024, 5, 1, 1));
        store.delete(task.id);
        store.update(task);
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_completion_twice_restores_state() {
        let mut store = store();
        let task = store.add("", "A", at(2024, 5, 1, 1));

        store.toggle_completion(task.id);
        assert!(store.get(task.id).unwrap().is_completed);
        store.toggle_completion(task.id);
        assert!(!store.get(task.id).unwrap().is_completed);
    }

    #[test]
    fn toggle_reminder_signals_schedule_then_nothing() {
        let mut store = store().with_reminder_delay(Duration::from_secs(5));
        let task = store.add("9:00 AM", "Dentist", at(2024, 5, 1, 9));

        match store.toggle_reminder(task.id) {
            ReminderResult::Schedule(req) => {
                assert_eq!(req.task_id, task.id);
                assert_eq!(req.message, "9:00 AM: Dentist");
                assert_eq!(req.delay, Duration::from_secs(5));
            }
            other => panic!("expected schedule request, got {other:?}"),
        }
        assert!(store.get(task.id).unwrap().has_reminder);

        assert_eq!(store.toggle_reminder(task.id), ReminderResult::NoAction);
        assert!(!store.get(task.id).unwrap().has_reminder);
    }

    #[test]
    fn missing_ids_are_ignored() {
        let mut store = store();
        let task = store.add("", "A", at(2024, 5, 1, 1));
        store.delete(task.id);

        store.toggle_completion(task.id);
        assert_eq!(store.toggle_reminder(task.id), ReminderResult::NoAction);
        store.delete(task.id);
        assert!(store.is_empty());
    }

    #[test]
    fn filtering_uses_store_timezone() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let mut store = TaskStore::with_timezone(plus_two);
        // 23:00 UTC on May 1 is 01:00 on May 2 in UTC+2
        store.add("", "late", at(2024, 5, 1, 23));

        let may2 = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert_eq!(titles(&store.tasks_on(may2)), ["late"]);
        assert!(store.tasks_on(may2.pred_opt().unwrap()).is_empty());
    }

    #[test]
    fn days_with_tasks_marks_month_days() {
        let mut store = store();
        store.add("", "a", at(2024, 5, 1, 9));
        store.add("", "b", at(2024, 5, 1, 10));
        store.add("", "c", at(2024, 5, 17, 9));
        store.add("", "d", at(2024, 6, 2, 9));

        let days = store.days_with_tasks(2024, 5);
        assert_eq!(days, HashSet::from([1, 17]));
    }

    #[test]
    fn sample_tasks_land_on_today_in_order() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let store = store().with_sample_tasks(today);

        assert_eq!(
            titles(&store.tasks_on(today)),
            ["Sam workout", "Business Deep Work", "Post Post Workout Routine", "Dentist"]
        );
    }
}
