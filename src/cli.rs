use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "SQLite-backed to-do list")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Path to the task database (defaults to tasks.db in the current directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Priority: high, medium or low (defaults to medium)
        #[arg(long)]
        priority: Option<String>,
        /// Due date in YYYY-MM-DD form
        #[arg(long)]
        due: Option<String>,
    },

    /// List tasks
    List {
        /// Show only completed tasks
        #[arg(long, conflicts_with = "active")]
        completed: bool,
        /// Show only active tasks
        #[arg(long)]
        active: bool,
        /// Emit the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Toggle a task between active and completed
    Toggle {
        /// Task ID
        id: i64,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
    },

    /// Delete all tasks
    Clear,
}
