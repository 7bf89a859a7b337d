use clap::{Parser, Subcommand};
use pomotimes_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pomotimes", version, about = "Pomodoro timer with task tracking and reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Interval durations
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Completed-session reports
    Report {
        #[command(subcommand)]
        action: commands::report::ReportAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Log to stderr so stdout stays parseable. `POMOTIMES_LOG` overrides the
/// configured level.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_env("POMOTIMES_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load();
    init_tracing(&config);

    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action, &config),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Report { action } => commands::report::run(action, &config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
