use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use day_planner::planner::{day, ReminderResult, ReminderScheduler, ScheduleOutcome, TaskStore};

fn on(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

#[test]
fn dentist_scenario() {
    let mut store = TaskStore::with_timezone(Utc);
    store.add("9:00 AM", "Dentist", on(2024, 5, 1, 9, 0));

    let may1 = store.tasks_for(on(2024, 5, 1, 0, 0));
    assert_eq!(may1.len(), 1);
    assert_eq!(may1[0].title, "Dentist");

    assert!(store.tasks_for(on(2024, 5, 2, 0, 0)).is_empty());
}

#[test]
fn out_of_order_additions_come_back_sorted() {
    let mut store = TaskStore::with_timezone(Utc);
    let d = on(2024, 5, 1, 0, 0);
    let three = store.add("", "+3h", d + chrono::Duration::hours(3));
    let one = store.add("", "+1h", d + chrono::Duration::hours(1));
    let two = store.add("", "+2h", d + chrono::Duration::hours(2));

    let ids: Vec<_> = store.tasks_for(d).into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![one.id, two.id, three.id]);
}

#[test]
fn local_day_boundaries_follow_injected_zone() {
    // UTC-5: 03:00 UTC on May 2 is still the evening of May 1
    let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
    let mut store = TaskStore::with_timezone(minus_five);
    store.add("10:00 PM", "Late call", on(2024, 5, 2, 3, 0));
    store.add("9:00 AM", "Standup", on(2024, 5, 1, 14, 0));

    let may1 = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let titles: Vec<_> = store.tasks_on(may1).into_iter().map(|t| t.title).collect();
    assert_eq!(titles, ["Standup", "Late call"]);

    let at = day::instant_on(may1, day::parse_time_label("10:00 PM").unwrap(), &minus_five);
    assert_eq!(at, Some(on(2024, 5, 2, 3, 0)));
}

#[tokio::test(start_paused = true)]
async fn reminder_round_trip_through_scheduler() {
    let mut store = TaskStore::with_timezone(Utc).with_reminder_delay(Duration::from_secs(5));
    let task = store.add("", "Stretch", on(2024, 5, 1, 9, 0));
    let (mut scheduler, mut rx) = ReminderScheduler::new(true);

    let ReminderResult::Schedule(request) = store.toggle_reminder(task.id) else {
        panic!("turning a reminder on must request scheduling");
    };
    assert_eq!(scheduler.schedule(request), ScheduleOutcome::Scheduled);

    tokio::time::sleep(Duration::from_secs(5) + Duration::from_millis(1)).await;
    let fired = rx.recv().await.unwrap();
    assert_eq!(fired.task_id, task.id);
    assert_eq!(fired.message, "Task: Stretch");

    assert_eq!(store.toggle_reminder(task.id), ReminderResult::NoAction);
    assert!(!store.get(task.id).unwrap().has_reminder);
}
