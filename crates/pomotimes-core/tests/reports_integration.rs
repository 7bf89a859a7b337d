//! Integration tests for session reports.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use pomotimes_core::reports::{daily_completed_count, hourly_buckets, weekly_buckets};
use pomotimes_core::{Session, SessionLog};
use proptest::prelude::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 6, 14, 20, 0).unwrap()
}

#[test]
fn three_sessions_in_last_hour_count_today() {
    let mut log = SessionLog::new();
    for minutes in [50, 30, 5] {
        log.record(now() - Duration::minutes(minutes));
    }
    assert_eq!(daily_completed_count(log.sessions(), &now()), 3);
}

#[test]
fn empty_log_yields_zero_filled_buckets() {
    let hourly = hourly_buckets(&[], &now());
    let weekly = weekly_buckets(&[], &now());
    assert_eq!(hourly.len(), 24);
    assert_eq!(weekly.len(), 7);
    assert!(hourly.iter().all(|b| b.count == 0));
    assert!(weekly.iter().all(|b| b.count == 0));
}

#[test]
fn offset_time_zone_shifts_hour_buckets() {
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    let local_now = now().with_timezone(&plus_two);
    let sessions = [Session::completed_at(now() - Duration::minutes(10))];
    let buckets = hourly_buckets(&sessions, &local_now);
    assert_eq!(buckets[23].label, "16:00");
    assert_eq!(buckets[23].count, 1);
}

fn session_strategy() -> impl Strategy<Value = Vec<Session>> {
    let base = now().timestamp_millis();
    let span = 10 * 24 * 60 * 60 * 1000i64;
    proptest::collection::vec((base - span)..(base + span), 0..200)
        .prop_map(|ts| ts.into_iter().map(|t| Session { completed_at_ms: t }).collect())
}

proptest! {
    #[test]
    fn aggregation_is_pure(sessions in session_strategy()) {
        let before = sessions.clone();
        prop_assert_eq!(hourly_buckets(&sessions, &now()), hourly_buckets(&sessions, &now()));
        prop_assert_eq!(weekly_buckets(&sessions, &now()), weekly_buckets(&sessions, &now()));
        prop_assert_eq!(sessions, before);
    }

    #[test]
    fn hourly_total_matches_window(sessions in session_strategy()) {
        let end = now().timestamp_millis();
        let start = end - 24 * 60 * 60 * 1000;
        let in_window = sessions
            .iter()
            .filter(|s| s.completed_at_ms >= start && s.completed_at_ms <= end)
            .count() as u32;
        let buckets = hourly_buckets(&sessions, &now());
        prop_assert_eq!(buckets.len(), 24);
        prop_assert_eq!(buckets.iter().map(|b| b.count).sum::<u32>(), in_window);
    }

    #[test]
    fn weekly_total_matches_calendar_week(sessions in session_strategy()) {
        let start = Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap().timestamp_millis();
        let end = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap().timestamp_millis();
        let in_week = sessions
            .iter()
            .filter(|s| s.completed_at_ms >= start && s.completed_at_ms < end)
            .count() as u32;
        let buckets = weekly_buckets(&sessions, &now());
        prop_assert_eq!(buckets.len(), 7);
        prop_assert_eq!(buckets.iter().map(|b| b.count).sum::<u32>(), in_week);
    }
}
