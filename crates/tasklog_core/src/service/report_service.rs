//! Full-table listings for diagnostics.
//!
//! Returns typed records only; formatting is left to the caller.

use crate::model::project::Project;
use crate::model::task::Task;
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::task_repo::{SqliteTaskRepository, TaskRepository};
use crate::repo::RepoResult;
use rusqlite::Connection;
use serde::Serialize;

/// Contents of both tables at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreSnapshot {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
}

/// Reads every project and task.
pub fn store_snapshot(conn: &Connection) -> RepoResult<StoreSnapshot> {
    let projects = SqliteProjectRepository::new(conn).list_projects()?;
    let tasks = SqliteTaskRepository::new(conn).list_tasks()?;
    Ok(StoreSnapshot { projects, tasks })
}
