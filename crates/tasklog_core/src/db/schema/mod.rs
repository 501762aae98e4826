//! Table definitions and the idempotent schema initializer.
//!
//! # Invariants
//! - Table and column names here are the on-disk layout; existing data files
//!   depend on them staying unchanged.
//! - Every DDL statement is `CREATE TABLE IF NOT EXISTS`, so running the
//!   initializer repeatedly never alters existing tables.

use crate::db::DbResult;
use log::{error, info};
use rusqlite::Connection;

pub const PROJECTS_TABLE: &str = "projects";
pub const TASKS_TABLE: &str = "tasks";

pub const PROJECTS_DDL: &str = include_str!("projects.sql");
pub const TASKS_DDL: &str = include_str!("tasks.sql");

#[derive(Debug, Clone, Copy)]
struct TableDef {
    name: &'static str,
    ddl: &'static str,
}

// `projects` first: `tasks` references it.
const TABLES: &[TableDef] = &[
    TableDef {
        name: PROJECTS_TABLE,
        ddl: PROJECTS_DDL,
    },
    TableDef {
        name: TASKS_TABLE,
        ddl: TASKS_DDL,
    },
];

/// Executes one "create if not exists" statement.
///
/// # Errors
/// - Returns `DbError::Sqlite` for malformed DDL or a locked store. The
///   caller decides whether that is fatal.
pub fn ensure_table(conn: &Connection, schema_ddl: &str) -> DbResult<()> {
    match conn.execute_batch(schema_ddl) {
        Ok(()) => Ok(()),
        Err(err) => {
            error!(
                "event=schema_ensure module=schema status=error error_code=ddl_failed error={}",
                err
            );
            Err(err.into())
        }
    }
}

/// Ensures both `projects` and `tasks` exist.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    for table in TABLES {
        ensure_table(conn, table.ddl)?;
        info!(
            "event=schema_ensure module=schema status=ok table={}",
            table.name
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{PROJECTS_DDL, TABLES, TASKS_DDL};

    #[test]
    fn ddl_is_idempotent_form() {
        assert!(PROJECTS_DDL.contains("CREATE TABLE IF NOT EXISTS projects"));
        assert!(TASKS_DDL.contains("CREATE TABLE IF NOT EXISTS tasks"));
        assert!(TASKS_DDL.contains("REFERENCES projects (id)"));
    }

    #[test]
    fn projects_are_created_before_tasks() {
        let names: Vec<&str> = TABLES.iter().map(|table| table.name).collect();
        assert_eq!(names, vec!["projects", "tasks"]);
    }
}
