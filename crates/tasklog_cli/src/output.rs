//! Presentation of typed records.
//!
//! Core returns records; this module only turns them into text.

use anyhow::Result;
use clap::ValueEnum;
use tasklog_core::{Project, StoreSnapshot, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn render_snapshot(snapshot: &StoreSnapshot, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
        OutputFormat::Text => {
            let mut out = String::from("Table 'projects':\n");
            push_lines(&mut out, snapshot.projects.iter().map(project_line));
            out.push_str("\nTable 'tasks':\n");
            push_lines(&mut out, snapshot.tasks.iter().map(task_line));
            Ok(out)
        }
    }
}

pub fn render_tasks(tasks: &[Task], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(tasks)?),
        OutputFormat::Text => {
            let mut out = String::new();
            push_lines(&mut out, tasks.iter().map(task_line));
            Ok(out)
        }
    }
}

fn push_lines(out: &mut String, lines: impl Iterator<Item = String>) {
    let mut empty = true;
    for line in lines {
        empty = false;
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
    if empty {
        out.push_str("  (empty)\n");
    }
}

fn project_line(project: &Project) -> String {
    format!(
        "[{}] {} | {} -> {}",
        project.id,
        project.name,
        project.start_date.as_deref().unwrap_or("-"),
        project.end_date.as_deref().unwrap_or("-"),
    )
}

fn task_line(task: &Task) -> String {
    let mut line = format!(
        "[{}] project={} {} ({}) | {} -> {}",
        task.id, task.project_id, task.name, task.status, task.start_date, task.end_date
    );
    if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(" | ");
        line.push_str(description);
    }
    line
}
