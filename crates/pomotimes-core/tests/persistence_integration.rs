//! Integration tests for persistence through the SQLite store.

use pomotimes_core::storage::{load_record, save_record, KeyValueStore, SESSIONS_KEY, SETTINGS_KEY};
use pomotimes_core::{Database, NullNotifier, PomodoroApp, SessionLog, Settings};

fn open(dir: &tempfile::TempDir) -> Database {
    Database::open_at(&dir.path().join("pomotimes.db")).unwrap()
}

#[test]
fn app_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let task_id = {
        let mut app = PomodoroApp::load(Box::new(open(&dir)), Box::new(NullNotifier));
        app.update_settings(50, 10, 20, 3).unwrap();
        let id = app.add_task("ship it", 3).unwrap().id;
        app.select_task(Some(&id));
        app.skip();
        app.skip();
        app.skip();
        id
    };

    let app = PomodoroApp::load(Box::new(open(&dir)), Box::new(NullNotifier));
    assert_eq!(app.settings(), &Settings::new(50, 10, 20, 3).unwrap());
    assert_eq!(app.sessions().len(), 2);
    assert_eq!(app.tasks().get(&task_id).unwrap().pomodoros_completed, 2);
    assert_eq!(app.engine().seconds_remaining(), 3000);
}

#[test]
fn legacy_json_records_load() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir);
    db.save(
        SETTINGS_KEY,
        br#"{"pomodoro":45,"shortBreak":5,"longBreak":20,"longBreakInterval":2}"#,
    )
    .unwrap();
    db.save("tasks", br#"[{"id":"2023-11-01T10:00:00.000Z","text":"Read","completed":false,"pomodoros":3,"estimate":4}]"#)
        .unwrap();
    db.save(SESSIONS_KEY, br#"[{"timestamp":1698832800000},{"timestamp":1698834600000}]"#)
        .unwrap();

    let app = PomodoroApp::load(Box::new(db), Box::new(NullNotifier));
    assert_eq!(app.settings().pomodoro_minutes(), 45);
    assert_eq!(app.tasks().len(), 1);
    assert_eq!(app.tasks().tasks()[0].pomodoros_completed, 3);
    assert_eq!(app.sessions().len(), 2);
}

#[test]
fn malformed_sessions_record_is_treated_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir);
    db.save(SESSIONS_KEY, b"[{\"timestamp\": \"yesterday\"}]").unwrap();
    let log: SessionLog = load_record(&db, SESSIONS_KEY);
    assert!(log.is_empty());

    assert!(save_record(&db, SESSIONS_KEY, &SessionLog::new()));
    assert_eq!(db.load(SESSIONS_KEY).unwrap().unwrap(), b"[]");
}

#[test]
fn timer_session_keeps_tasks_added_by_another_process() {
    let dir = tempfile::tempdir().unwrap();
    let mut timer = PomodoroApp::load(Box::new(open(&dir)), Box::new(NullNotifier));
    let a = timer.add_task("a", 2).unwrap().id;
    assert!(timer.select_task(Some(&a)));

    let mut cli = PomodoroApp::load(Box::new(open(&dir)), Box::new(NullNotifier));
    let b = cli.add_task("b", 1).unwrap().id;

    // The running session can pick up the new task...
    assert!(timer.select_task(Some(&b)));
    assert!(timer.select_task(Some(&a)));
    // ...and crediting a focus completion does not write a stale list back.
    timer.skip();

    let reloaded = PomodoroApp::load(Box::new(open(&dir)), Box::new(NullNotifier));
    assert_eq!(reloaded.tasks().len(), 2);
    assert_eq!(reloaded.tasks().get(&a).unwrap().pomodoros_completed, 1);
    assert!(reloaded.tasks().get(&b).is_some());
}

#[test]
fn concurrent_sessions_both_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let mut first = PomodoroApp::load(Box::new(open(&dir)), Box::new(NullNotifier));
    let mut second = PomodoroApp::load(Box::new(open(&dir)), Box::new(NullNotifier));
    first.skip();
    second.skip();

    let log: SessionLog = load_record(&open(&dir), SESSIONS_KEY);
    assert_eq!(log.len(), 2);
}
