use chrono::Local;
use clap::Subcommand;
use pomotimes_core::error::Result;
use pomotimes_core::reports;
use pomotimes_core::Config;

use super::load_app;

#[derive(Subcommand)]
pub enum ReportAction {
    /// Sessions completed today against the daily goal
    Today,
    /// Sessions per hour over the last 24 hours
    Hourly,
    /// Sessions per day this week (Sunday first)
    Weekly,
}

pub fn run(action: ReportAction, config: &Config) -> Result<()> {
    let app = load_app();
    let now = Local::now();

    let json = match action {
        ReportAction::Today => serde_json::to_string_pretty(&reports::daily_summary(
            app.sessions(),
            &now,
            config.reports.daily_goal,
        ))?,
        ReportAction::Hourly => {
            serde_json::to_string_pretty(&reports::hourly_buckets(app.sessions(), &now))?
        }
        ReportAction::Weekly => {
            serde_json::to_string_pretty(&reports::weekly_buckets(app.sessions(), &now))?
        }
    };
    println!("{json}");
    Ok(())
}
