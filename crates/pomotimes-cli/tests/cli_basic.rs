//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pomotimes"));
    cmd.env("POMOTIMES_DATA_DIR", dir.path())
        .env("POMOTIMES_LOG", "off");
    cmd
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = cli(dir)
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("stdout is JSON")
}

#[test]
fn test_settings_show_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = run_json(&dir, &["settings", "show"]);
    assert_eq!(settings["pomodoro"], 25);
    assert_eq!(settings["shortBreak"], 5);
    assert_eq!(settings["longBreak"], 15);
    assert_eq!(settings["longBreakInterval"], 4);
}

#[test]
fn test_settings_set_persists() {
    let dir = TempDir::new().unwrap();
    run_json(&dir, &["settings", "set", "--pomodoro", "50", "--long-break-interval", "2"]);
    let settings = run_json(&dir, &["settings", "show"]);
    assert_eq!(settings["pomodoro"], 50);
    assert_eq!(settings["shortBreak"], 5);
    assert_eq!(settings["longBreakInterval"], 2);

    let (_, _, code) = run_cli(&dir, &["settings", "reset"]);
    assert_eq!(code, 0);
    assert_eq!(run_json(&dir, &["settings", "show"])["pomodoro"], 25);
}

#[test]
fn test_settings_set_rejects_non_positive() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["settings", "set", "--short-break", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
    assert_eq!(run_json(&dir, &["settings", "show"])["shortBreak"], 5);
}

#[test]
fn test_task_add_list_toggle_delete() {
    let dir = TempDir::new().unwrap();
    let first = run_json(&dir, &["task", "add", "Write report", "--estimate", "3"]);
    let second = run_json(&dir, &["task", "add", "Review PR"]);
    assert_eq!(first["text"], "Write report");
    assert_eq!(first["estimate"], 3);
    assert_eq!(second["estimate"], 1);
    assert_eq!(second["pomodoros"], 0);

    let listing = run_json(&dir, &["task", "list"]);
    let engaged = listing["engaged"].as_array().unwrap();
    assert_eq!(engaged.len(), 2);
    // Newest first.
    assert_eq!(engaged[0]["text"], "Review PR");

    let id = first["id"].as_str().unwrap();
    let toggled = run_json(&dir, &["task", "toggle", id]);
    assert_eq!(toggled["completed"], true);
    let listing = run_json(&dir, &["task", "list"]);
    assert_eq!(listing["engaged"].as_array().unwrap().len(), 1);
    assert_eq!(listing["terminated"][0]["id"], id);

    let (stdout, _, code) = run_cli(&dir, &["task", "delete", id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Task deleted"));
    assert!(run_json(&dir, &["task", "list"])["terminated"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[test]
fn test_task_errors() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["task", "add", "   "]);
    assert_eq!(code, 1);
    assert!(stderr.contains("empty"));

    let (_, stderr, code) = run_cli(&dir, &["task", "toggle", "missing"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Task not found"));
}

#[test]
fn test_report_shapes() {
    let dir = TempDir::new().unwrap();
    let today = run_json(&dir, &["report", "today"]);
    assert_eq!(today["completed"], 0);
    assert_eq!(today["daily_goal"], 8);

    let hourly = run_json(&dir, &["report", "hourly"]);
    assert_eq!(hourly.as_array().unwrap().len(), 24);

    let weekly = run_json(&dir, &["report", "weekly"]);
    let days = weekly.as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["label"], "Sun");
}

#[test]
fn test_config_get_set_list() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["config", "get", "reports.daily_goal"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "8");

    let (_, _, code) = run_cli(&dir, &["config", "set", "reports.daily_goal", "4"]);
    assert_eq!(code, 0);
    assert_eq!(run_json(&dir, &["config", "list"])["reports"]["daily_goal"], 4);
    assert_eq!(run_json(&dir, &["report", "today"])["daily_goal"], 4);

    let (_, _, code) = run_cli(&dir, &["config", "set", "reports.nope", "1"]);
    assert_eq!(code, 1);
}

#[test]
fn test_timer_skip_records_session_and_credits_task() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["config", "set", "notifications.enabled", "false"]);
    let task = run_json(&dir, &["task", "add", "Deep work"]);
    let id = task["id"].as_str().unwrap();

    let mut child = cli(&dir)
        .args(["timer", "run", "--task", id])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn timer");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"s\nq\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"type\":\"focus_completed\""));
    assert!(stdout.contains("[Short Break] 05:00 paused | #1 | 0% | today 1/8"));

    assert_eq!(run_json(&dir, &["report", "today"])["completed"], 1);
    let listing = run_json(&dir, &["task", "list"]);
    assert_eq!(listing["engaged"][0]["pomodoros"], 1);
}

#[test]
fn test_timer_rejects_unknown_task() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["timer", "run", "--task", "ghost"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Task not found"));
}
