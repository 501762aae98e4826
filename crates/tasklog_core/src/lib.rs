//! Persistence layer for a two-table task tracker (projects and tasks).
//! The embedded SQLite store is the single source of truth.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use db::schema::{ensure_schema, ensure_table, PROJECTS_TABLE, TASKS_TABLE};
pub use db::{close_db, open_db, open_db_in_memory, open_db_with, DbError, OpenOptions};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{Project, ProjectId};
pub use model::task::{status, NewTask, Task, TaskId};
pub use model::ValidationError;
pub use query::{BuiltQuery, Constraints, QueryError};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::table::{delete_all, delete_where, select_all, select_where, update_row, GenericRow};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::report_service::{store_snapshot, StoreSnapshot};
pub use service::seed_service::{seed_sample_data, SeedFailure, SeedReport};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
