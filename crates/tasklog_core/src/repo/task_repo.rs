//! Task repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Ids are assigned by the store on insert.
//! - Status filters are exact, case-sensitive matches.

use crate::db::schema::TASKS_TABLE;
use crate::model::task::{NewTask, Task, TaskId};
use crate::query::{self, BuiltQuery, Constraints};
use crate::repo::{table, RepoResult};
use rusqlite::{params, params_from_iter, Connection, Row};

/// Repository interface for task persistence.
pub trait TaskRepository {
    /// Inserts a task and returns the store-assigned id.
    fn insert_task(&self, task: &NewTask) -> RepoResult<TaskId>;
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    fn select_tasks_by_status(&self, status: &str) -> RepoResult<Vec<Task>>;
    fn find_tasks(&self, constraints: &Constraints) -> RepoResult<Vec<Task>>;
    /// Applies column changes (e.g. `status`, `start_date`, `end_date`).
    ///
    /// Returns the affected row count; `0` when no task has `id`.
    fn update_task(&self, id: TaskId, changes: &Constraints) -> RepoResult<usize>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_tasks(&self, query: &BuiltQuery) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(query.sql())?;
        let tasks = stmt
            .query_map(params_from_iter(query.params()), parse_task_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn insert_task(&self, task: &NewTask) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (project_id, name, description, status, start_date, end_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                task.project_id,
                task.name.as_str(),
                task.description.as_deref(),
                task.status.as_str(),
                task.start_date.as_str(),
                task.end_date.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.query_tasks(&query::select_all(TASKS_TABLE)?)
    }

    fn select_tasks_by_status(&self, status: &str) -> RepoResult<Vec<Task>> {
        self.find_tasks(&Constraints::new().with_text("status", status))
    }

    fn find_tasks(&self, constraints: &Constraints) -> RepoResult<Vec<Task>> {
        self.query_tasks(&query::select_where(TASKS_TABLE, constraints)?)
    }

    fn update_task(&self, id: TaskId, changes: &Constraints) -> RepoResult<usize> {
        table::update_row(self.conn, TASKS_TABLE, id, changes)
    }
}

fn parse_task_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        status: row.get("status")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
    })
}
