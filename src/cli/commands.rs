//! CLI command definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Track tasks with a fixed todo/doing/done status in a local SQLite file
#[derive(Parser, Debug)]
#[command(name = "tasklite")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database file (overrides $TASK_DB and ./tasks.db)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Task description
        description: String,

        /// Status (todo, doing, done), any letter case
        status: String,
    },

    /// List all tasks
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a single task
    Show {
        /// Task ID
        id: i64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Replace a task's description and status
    Update {
        /// Task ID
        id: i64,

        /// New description
        description: String,

        /// New status (todo, doing, done)
        status: String,
    },

    /// Mark a task as done
    Done {
        /// Task ID
        id: i64,
    },
}
