//! Command execution against one scoped store connection.

use crate::cli::{Cli, Command};
use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use log::info;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tasklog_core::{
    close_db, default_log_level, delete_all, delete_where, ensure_schema, init_logging,
    open_db_with, seed_sample_data, store_snapshot, Constraints, NewTask, OpenOptions, Project,
    ProjectRepository, SqliteProjectRepository, SqliteTaskRepository, TaskRepository,
};

/// Opens the store, runs one command and closes the store on every path.
pub fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
        init_logging(level, &absolute(log_dir)?)
            .map_err(anyhow::Error::msg)
            .context("failed to initialize logging")?;
    }

    let options = OpenOptions {
        foreign_keys: !cli.no_foreign_keys,
    };
    let conn = open_db_with(&cli.db, options)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;

    let command = cli.command.unwrap_or(Command::Seed);
    let result = dispatch(&conn, command, cli.format);
    let closed = close_db(conn).context("failed to close database");
    result?;
    closed
}

fn dispatch(conn: &Connection, command: Command, format: OutputFormat) -> Result<()> {
    match command {
        Command::Seed => {
            let report = seed_sample_data(conn).context("failed to create tables")?;
            for failure in &report.failures {
                match failure.project_id {
                    Some(id) => eprintln!("project {id}: {}", failure.error),
                    None => eprintln!("cleanup: {}", failure.error),
                }
            }
            info!(
                "event=cli_seed module=cli status=ok inserted={}",
                report.inserted.len()
            );
            show(conn, format)
        }
        Command::Show => show(conn, format),
        Command::Init => {
            ensure_schema(conn).context("failed to create tables")?;
            println!("OK");
            Ok(())
        }
        Command::AddProject {
            id,
            name,
            start,
            end,
        } => {
            let project = Project {
                id,
                name,
                start_date: start,
                end_date: end,
            };
            let id = SqliteProjectRepository::new(conn)
                .insert_project(&project)
                .context("failed to insert project")?;
            println!("{id}");
            Ok(())
        }
        Command::AddTask {
            project_id,
            name,
            start,
            end,
            status,
            description,
        } => {
            let mut task = NewTask::new(project_id, name, status, start, end);
            task.description = description;
            let id = SqliteTaskRepository::new(conn)
                .insert_task(&task)
                .context("failed to insert task")?;
            println!("{id}");
            Ok(())
        }
        Command::Tasks { status } => {
            let repo = SqliteTaskRepository::new(conn);
            let tasks = match status.as_deref() {
                Some(status) => repo.select_tasks_by_status(status),
                None => repo.list_tasks(),
            }
            .context("failed to read tasks")?;
            emit(&output::render_tasks(&tasks, format)?);
            Ok(())
        }
        Command::UpdateTask {
            id,
            status,
            start,
            end,
        } => {
            let mut changes = Constraints::new();
            for (column, value) in [("status", status), ("start_date", start), ("end_date", end)] {
                if let Some(value) = value {
                    changes.insert(column, value);
                }
            }
            let updated = SqliteTaskRepository::new(conn)
                .update_task(id, &changes)
                .context("failed to update task")?;
            println!("updated {updated} row(s)");
            Ok(())
        }
        Command::Delete { table, filters } => {
            let constraints: Constraints = filters.into_iter().collect();
            let deleted = delete_where(conn, table.name(), &constraints)
                .with_context(|| format!("failed to delete from {}", table.name()))?;
            println!("deleted {deleted} row(s)");
            Ok(())
        }
        Command::Clear { table } => {
            let deleted = delete_all(conn, table.name())
                .with_context(|| format!("failed to clear {}", table.name()))?;
            println!("deleted {deleted} row(s)");
            Ok(())
        }
    }
}

fn show(conn: &Connection, format: OutputFormat) -> Result<()> {
    let snapshot = store_snapshot(conn).context("failed to read tables")?;
    emit(&output::render_snapshot(&snapshot, format)?);
    Ok(())
}

fn emit(text: &str) {
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::{absolute, run};
    use crate::cli::Cli;
    use clap::Parser;
    use std::path::Path;
    use tasklog_core::{logging_status, open_db, store_snapshot};

    fn cli(db: &str, args: &[&str]) -> Cli {
        let mut argv = vec!["tasklog", "--db", db];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn seed_twice_succeeds_and_keeps_six_projects() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("database.db");
        let db = db.to_str().unwrap();

        run(cli(db, &[])).unwrap();
        run(cli(db, &["seed"])).unwrap();

        let conn = open_db(db).unwrap();
        let snapshot = store_snapshot(&conn).unwrap();
        assert_eq!(snapshot.projects.len(), 6);
    }

    #[test]
    fn task_lifecycle_through_commands() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("database.db");
        let db = db.to_str().unwrap();

        run(cli(db, &["init"])).unwrap();
        run(cli(db, &["add-project", "1", "Legs", "--start", "10:00", "--end", "13:00"])).unwrap();
        run(cli(db, &["add-task", "1", "Warmup", "--start", "10:00", "--end", "10:30"])).unwrap();
        run(cli(db, &["update-task", "1", "--status", "done"])).unwrap();

        let conn = open_db(db).unwrap();
        let snapshot = store_snapshot(&conn).unwrap();
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.tasks[0].status, "done");
        drop(conn);

        run(cli(db, &["delete", "tasks", "--where", "status=done"])).unwrap();
        let conn = open_db(db).unwrap();
        assert!(store_snapshot(&conn).unwrap().tasks.is_empty());
    }

    #[test]
    fn update_without_changes_fails() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("database.db");
        let db = db.to_str().unwrap();

        run(cli(db, &["init"])).unwrap();
        assert!(run(cli(db, &["update-task", "1"])).is_err());
    }

    #[test]
    fn seed_with_log_dir_writes_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("database.db");
        let db = db.to_str().unwrap();
        let log_dir = dir.path().join("logs");
        let log_dir_str = log_dir.to_str().unwrap();

        run(cli(db, &["--log-dir", log_dir_str, "--log-level", "info", "seed"])).unwrap();

        let (level, active_dir) = logging_status().unwrap();
        assert_eq!(level, "info");
        assert_eq!(active_dir, log_dir);
        let has_log_file = std::fs::read_dir(&log_dir).unwrap().any(|entry| {
            let name = entry.unwrap().file_name();
            let name = name.to_string_lossy();
            name.starts_with("tasklog") && name.ends_with(".log")
        });
        assert!(has_log_file);
    }

    #[test]
    fn unsupported_log_level_fails() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("database.db");
        let db = db.to_str().unwrap();
        let log_dir = dir.path().join("other-logs");

        let err = run(cli(
            db,
            &["--log-dir", log_dir.to_str().unwrap(), "--log-level", "verbose", "show"],
        ))
        .unwrap_err();
        assert!(format!("{err:#}").contains("unsupported log level"));
    }

    #[test]
    fn absolute_resolves_relative_paths_against_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolute(Path::new("logs")).unwrap(), cwd.join("logs"));

        let dir = tempfile::tempdir().unwrap();
        assert_eq!(absolute(dir.path()).unwrap(), dir.path());
    }

    #[test]
    fn delete_matches_integer_columns_from_text_values() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("database.db");
        let db = db.to_str().unwrap();

        run(cli(db, &["init"])).unwrap();
        run(cli(db, &["add-project", "1", "Legs"])).unwrap();
        run(cli(db, &["add-project", "2", "Back"])).unwrap();
        run(cli(db, &["add-task", "1", "Warmup", "--start", "a", "--end", "b"])).unwrap();
        run(cli(db, &["add-task", "2", "Rows", "--start", "a", "--end", "b"])).unwrap();

        run(cli(db, &["delete", "tasks", "--where", "project_id=1"])).unwrap();
        run(cli(db, &["delete", "projects", "--where", "id=1"])).unwrap();

        let conn = open_db(db).unwrap();
        let snapshot = store_snapshot(&conn).unwrap();
        assert_eq!(snapshot.projects.len(), 1);
        assert_eq!(snapshot.projects[0].id, 2);
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.tasks[0].name, "Rows");
    }
}
