//! Command-line definition.

use crate::output::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tasklog_core::{PROJECTS_TABLE, TASKS_TABLE};

#[derive(Debug, Parser)]
#[command(name = "tasklog", version, about = "Projects and tasks in an embedded SQLite store")]
pub struct Cli {
    /// Database file, created if absent
    #[arg(long, env = "TASKLOG_DB", default_value = "database.db")]
    pub db: PathBuf,

    /// Directory for rotating log files; logging is off when unset
    #[arg(long, env = "TASKLOG_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (defaults per build mode)
    #[arg(long, env = "TASKLOG_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Do not enforce tasks.project_id -> projects.id
    #[arg(long)]
    pub no_foreign_keys: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Defaults to `seed`
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Remove the stale project, create tables, insert sample projects and print everything
    Seed,

    /// Print both tables
    Show,

    /// Create the tables if they do not exist
    Init,

    /// Insert a project with an explicit id
    AddProject {
        id: i64,
        name: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },

    /// Insert a task; prints the assigned id
    AddTask {
        project_id: i64,
        name: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long, default_value = "todo")]
        status: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// List tasks, optionally filtered by status
    Tasks {
        #[arg(long)]
        status: Option<String>,
    },

    /// Change status and/or dates of a task
    UpdateTask {
        id: i64,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },

    /// Delete rows where every COLUMN=VALUE pair matches
    Delete {
        #[arg(value_enum)]
        table: TableArg,
        #[arg(long = "where", value_name = "COLUMN=VALUE", required = true, value_parser = parse_pair)]
        filters: Vec<(String, String)>,
    },

    /// Delete every row of a table
    Clear {
        #[arg(value_enum)]
        table: TableArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableArg {
    Projects,
    Tasks,
}

impl TableArg {
    pub fn name(self) -> &'static str {
        match self {
            Self::Projects => PROJECTS_TABLE,
            Self::Tasks => TASKS_TABLE,
        }
    }
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected COLUMN=VALUE, got `{raw}`")),
    }
}
