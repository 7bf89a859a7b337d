//! Reporting over the session log.
//!
//! All functions are pure: they read the log and a caller-supplied `now`, and
//! produce fixed-size, zero-filled bucket lists. Hour-of-day and day-of-week
//! are taken in the time zone of `now`.

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::session::Session;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Completed sessions in one hour-of-day over the trailing 24 hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBucket {
    /// Hour of day, 0-23.
    pub hour: u32,
    pub label: String,
    pub count: u32,
}

/// Completed sessions on one day of the current calendar week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBucket {
    /// Day of week, 0 = Sunday.
    pub day: u32,
    pub label: String,
    pub count: u32,
}

/// Today's count against the daily goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub completed: u32,
    pub daily_goal: u32,
    pub progress_pct: f64,
}

/// 24 buckets in chronological order, ending with the current hour.
///
/// Sessions in `[now - 24h, now]` are binned into the hour that contains
/// them, counted back from `now`. The oldest partial hour of the window shares
/// its hour of day with the current hour and lands in the last bucket. On the
/// day clocks fall back two buckets carry the same label.
pub fn hourly_buckets<Tz: TimeZone>(sessions: &[Session], now: &DateTime<Tz>) -> Vec<HourBucket> {
    let now_ms = now.timestamp_millis();
    let window = (now_ms - DAY_MS)..=now_ms;

    let hours: Vec<DateTime<Tz>> = (0..24i64)
        .rev()
        .map(|i| now.clone() - Duration::hours(i))
        .collect();
    let starts: Vec<i64> = hours.iter().map(hour_start_ms).collect();
    let mut buckets: Vec<HourBucket> = hours
        .iter()
        .map(|at| HourBucket {
            hour: at.hour(),
            label: format!("{}:00", at.hour()),
            count: 0,
        })
        .collect();

    for session in sessions.iter().filter(|s| window.contains(&s.completed_at_ms)) {
        let idx = starts
            .iter()
            .rposition(|&start| start <= session.completed_at_ms)
            .unwrap_or(buckets.len() - 1);
        buckets[idx].count += 1;
    }
    buckets
}

/// Epoch millis of the top of `at`'s local hour.
fn hour_start_ms<Tz: TimeZone>(at: &DateTime<Tz>) -> i64 {
    let into_hour = i64::from(at.minute()) * 60_000
        + i64::from(at.second()) * 1_000
        + i64::from(at.nanosecond() % 1_000_000_000 / 1_000_000);
    at.timestamp_millis() - into_hour
}

/// 7 buckets, Sunday first, for the calendar week containing `now`.
pub fn weekly_buckets<Tz: TimeZone>(sessions: &[Session], now: &DateTime<Tz>) -> Vec<DayBucket> {
    let tz = now.timezone();
    let start = start_of_week(now);
    let end = local_midnight(&tz, start.date_naive() + Days::new(7));
    let window = start.timestamp_millis()..end.timestamp_millis();

    let mut buckets: Vec<DayBucket> = WEEKDAY_LABELS
        .iter()
        .enumerate()
        .map(|(day, label)| DayBucket {
            day: day as u32,
            label: (*label).to_string(),
            count: 0,
        })
        .collect();

    for session in sessions.iter().filter(|s| window.contains(&s.completed_at_ms)) {
        let Some(at) = session.completed_in(&tz) else {
            continue;
        };
        buckets[at.weekday().num_days_from_sunday() as usize].count += 1;
    }
    buckets
}

/// Sessions completed since local midnight.
pub fn daily_completed_count<Tz: TimeZone>(sessions: &[Session], now: &DateTime<Tz>) -> u32 {
    let since = start_of_day(now).timestamp_millis();
    sessions.iter().filter(|s| s.completed_at_ms >= since).count() as u32
}

/// Percentage of `goal` reached, capped at 100. A zero goal counts as met.
pub fn daily_goal_progress(completed: u32, goal: u32) -> f64 {
    if goal == 0 {
        return 100.0;
    }
    (f64::from(completed) / f64::from(goal) * 100.0).min(100.0)
}

pub fn daily_summary<Tz: TimeZone>(
    sessions: &[Session],
    now: &DateTime<Tz>,
    daily_goal: u32,
) -> DailySummary {
    let completed = daily_completed_count(sessions, now);
    DailySummary {
        completed,
        daily_goal,
        progress_pct: daily_goal_progress(completed, daily_goal),
    }
}

/// Local midnight at the start of `now`'s day.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    local_midnight(&now.timezone(), now.date_naive())
}

/// Local midnight on the Sunday of `now`'s week.
pub fn start_of_week<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let back = u64::from(now.weekday().num_days_from_sunday());
    local_midnight(&now.timezone(), now.date_naive() - Days::new(back))
}

fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let naive = date.and_time(NaiveTime::MIN);
    // A DST jump can skip midnight; the day then starts at the first local
    // time after the gap.
    (0..=3)
        .find_map(|h| tz.from_local_datetime(&(naive + Duration::hours(h))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}
