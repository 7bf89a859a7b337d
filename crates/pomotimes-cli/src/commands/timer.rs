//! Interactive timer loop.
//!
//! Reads one command per line from stdin while the timer ticks:
//! `p` start/pause, `s` skip, `r` reset, `select <id>`, `deselect`,
//! `settings <pomodoro> <short> <long> <interval>`, `q` quit.

use chrono::{DateTime, Local, TimeZone};
use clap::Subcommand;
use pomotimes_core::driver::{self, Command};
use pomotimes_core::error::{CoreError, Result};
use pomotimes_core::reports;
use pomotimes_core::timer::format_clock;
use pomotimes_core::{Config, Event, PomodoroApp, Settings};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use super::{notifier, open_store};

const HELP: &str = "commands: p (start/pause), s (skip), r (reset), select <id>, deselect, \
                    settings <pomodoro> <short> <long> <interval>, q (quit)";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the timer interactively
    Run {
        /// Task to credit completed focus sessions to
        #[arg(long)]
        task: Option<String>,
    },
}

pub fn run(action: TimerAction, config: &Config) -> Result<()> {
    match action {
        TimerAction::Run { task } => run_interactive(task, config),
    }
}

fn run_interactive(task: Option<String>, config: &Config) -> Result<()> {
    let mut app = PomodoroApp::load(open_store(), notifier(config));
    if let Some(id) = task {
        if !app.select_task(Some(&id)) {
            return Err(CoreError::TaskNotFound(id));
        }
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let (tx, rx) = mpsc::channel(16);
        eprintln!("{HELP}");
        let goal = config.reports.daily_goal;
        print_status(&app, goal);
        tokio::join!(
            driver::run(&mut app, rx, |app, event| {
                if let Some(event) = event.filter(|e| e.is_transition()) {
                    print_event(event);
                }
                print_status(app, goal);
            }),
            read_commands(tx),
        );
    });
    Ok(())
}

async fn read_commands(tx: mpsc::Sender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("stdin read failed: {e}");
                break;
            }
        };
        match parse_command(&line) {
            Ok(cmd) => {
                let quit = cmd == Command::Quit;
                if tx.send(cmd).await.is_err() || quit {
                    break;
                }
            }
            Err(msg) => eprintln!("{msg}\n{HELP}"),
        }
    }
}

fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or("p");
    let rest: Vec<&str> = words.collect();

    match (head, rest.as_slice()) {
        ("p" | "start" | "pause", []) => Ok(Command::StartPause),
        ("s" | "skip", []) => Ok(Command::Skip),
        ("r" | "reset", []) => Ok(Command::Reset),
        ("q" | "quit", []) => Ok(Command::Quit),
        ("deselect", []) => Ok(Command::SelectTask(None)),
        ("select", [id]) => Ok(Command::SelectTask(Some((*id).to_string()))),
        ("settings", [p, s, l, i]) => {
            let num = |v: &str| v.parse::<i64>().map_err(|_| format!("not a number: {v}"));
            Settings::new(num(p)?, num(s)?, num(l)?, num(i)?)
                .map(Command::ApplySettings)
                .map_err(|e| e.to_string())
        }
        _ => Err(format!("unknown command: {}", line.trim())),
    }
}

fn print_event(event: &Event) {
    match serde_json::to_string(event) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::warn!("failed to serialize event: {e}"),
    }
}

fn print_status(app: &PomodoroApp, daily_goal: u32) {
    println!("{}", status_line(app, daily_goal, &Local::now()));
}

fn status_line<Tz: TimeZone>(app: &PomodoroApp, daily_goal: u32, now: &DateTime<Tz>) -> String {
    let engine = app.engine();
    let state = if engine.is_running() { "running" } else { "paused" };
    let today = reports::daily_completed_count(app.sessions(), now);
    let task = app
        .selected_task()
        .map(|t| format!(" | {} ({}/{})", t.text, t.pomodoros_completed, t.estimate_pomodoros))
        .unwrap_or_default();
    format!(
        "[{}] {} {} | #{} | {:.0}% | today {}/{}{}",
        engine.mode(),
        format_clock(engine.seconds_remaining()),
        state,
        engine.completed_focus_count(),
        engine.progress() * 100.0,
        today,
        daily_goal,
        task
    )
}
