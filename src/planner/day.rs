//! Calendar-day arithmetic. Every function takes the timezone explicitly so
//! results do not depend on the host's local zone unless the caller asks.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, TimeZone, Utc};

/// The calendar day `instant` falls on in `tz`.
pub fn calendar_day<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// True when both instants fall on the same calendar day in `tz`.
/// Time of day is ignored.
pub fn same_calendar_day<Tz: TimeZone>(a: &DateTime<Utc>, b: &DateTime<Utc>, tz: &Tz) -> bool {
    calendar_day(a, tz) == calendar_day(b, tz)
}

/// Parse a free-form time label such as "9:00 AM", "5:00am", "9pm" or
/// "14:30". Returns `None` for empty or unrecognised labels.
pub fn parse_time_label(label: &str) -> Option<NaiveTime> {
    let mut compact: String = label
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    if compact.is_empty() {
        return None;
    }

    let has_meridiem = compact.ends_with("AM") || compact.ends_with("PM");
    if has_meridiem && !compact.contains(':') {
        // chrono needs minutes; "9PM" -> "9:00PM"
        let split = compact.len() - 2;
        compact.insert_str(split, ":00");
    }

    if has_meridiem {
        NaiveTime::parse_from_str(&compact, "%I:%M%p").ok()
    } else {
        NaiveTime::parse_from_str(&compact, "%H:%M").ok()
    }
}

/// Resolve a wall-clock time on `day` in `tz` to an instant. Ambiguous
/// times (DST fall-back) take the earlier mapping; times inside a DST gap
/// yield `None`.
pub fn instant_on<Tz: TimeZone>(day: NaiveDate, time: NaiveTime, tz: &Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&day.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// "Today", "Tomorrow" or "Yesterday" relative to `today`, else the full
/// date.
pub fn relative_label(day: NaiveDate, today: NaiveDate) -> String {
    match (day - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => day.format("%A, %B %d, %Y").to_string(),
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Move `date` by whole months, clamping the day to the target month's
/// length. Out-of-range results leave `date` unchanged.
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}
