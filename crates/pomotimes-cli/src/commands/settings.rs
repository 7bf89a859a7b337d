use clap::Subcommand;
use pomotimes_core::error::Result;
use pomotimes_core::Settings;

use super::load_app;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print current settings as JSON
    Show,
    /// Change one or more values (minutes, interval in pomodoros)
    Set {
        #[arg(long)]
        pomodoro: Option<i64>,
        #[arg(long)]
        short_break: Option<i64>,
        #[arg(long)]
        long_break: Option<i64>,
        /// Focus sessions between long breaks
        #[arg(long)]
        long_break_interval: Option<i64>,
    },
    /// Restore the 25/5/15/4 defaults
    Reset,
}

pub fn run(action: SettingsAction) -> Result<()> {
    let mut app = load_app();

    match action {
        SettingsAction::Show => {
            println!("{}", serde_json::to_string_pretty(app.settings())?);
        }
        SettingsAction::Set {
            pomodoro,
            short_break,
            long_break,
            long_break_interval,
        } => {
            let current = *app.settings();
            app.update_settings(
                pomodoro.unwrap_or(current.pomodoro_minutes().into()),
                short_break.unwrap_or(current.short_break_minutes().into()),
                long_break.unwrap_or(current.long_break_minutes().into()),
                long_break_interval.unwrap_or(current.long_break_interval().into()),
            )?;
            println!("{}", serde_json::to_string_pretty(app.settings())?);
        }
        SettingsAction::Reset => {
            app.save_settings(Settings::default());
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
