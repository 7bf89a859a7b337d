//! Task management commands for CLI.

use clap::Subcommand;
use pomotimes_core::error::{CoreError, Result};
use pomotimes_core::Task;
use serde::Serialize;

use super::load_app;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task text
        text: String,
        /// Estimated pomodoros (default: 1)
        #[arg(long, default_value = "1")]
        estimate: u32,
    },
    /// List tasks, in progress and done
    List,
    /// Mark a task done, or not done again
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

#[derive(Serialize)]
struct TaskListing<'a> {
    engaged: Vec<&'a Task>,
    terminated: Vec<&'a Task>,
}

pub fn run(action: TaskAction) -> Result<()> {
    let mut app = load_app();

    match action {
        TaskAction::Add { text, estimate } => {
            let task = app.add_task(&text, estimate)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List => {
            let listing = TaskListing {
                engaged: app.tasks().engaged().collect(),
                terminated: app.tasks().terminated().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        TaskAction::Toggle { id } => {
            if app.toggle_task(&id).is_none() {
                return Err(CoreError::TaskNotFound(id));
            }
            if let Some(task) = app.tasks().get(&id) {
                println!("{}", serde_json::to_string_pretty(task)?);
            }
        }
        TaskAction::Delete { id } => {
            if app.delete_task(&id).is_none() {
                return Err(CoreError::TaskNotFound(id));
            }
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}
