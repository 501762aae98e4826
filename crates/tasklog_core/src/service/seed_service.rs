//! Sample-data seeding.
//!
//! # Invariants
//! - Schema creation failure aborts the sequence.
//! - Cleanup and per-project insert failures are logged and recorded, and
//!   the sequence continues. Rows inserted before a failure stay committed.

use crate::db::schema::{ensure_schema, PROJECTS_TABLE};
use crate::model::project::{Project, ProjectId};
use crate::query::Constraints;
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::{table, RepoResult};
use log::{info, warn};
use rusqlite::Connection;

/// Name of the project removed before seeding.
pub const STALE_PROJECT_NAME: &str = "Powtórka z angielskiego";

const SAMPLE_START: &str = "06.03.2024 10:00";
const SAMPLE_END: &str = "06.03.2024 13:00";

const SAMPLE_PROJECT_NAMES: &[(ProjectId, &str)] = &[
    (1, "Klatka piersiowa"),
    (2, "Plecy"),
    (3, "Nogi"),
    (4, "Barki"),
    (5, "Biceps"),
    (6, "Triceps"),
];

/// Six fixed sample projects with ids 1 to 6.
pub fn sample_projects() -> Vec<Project> {
    SAMPLE_PROJECT_NAMES
        .iter()
        .map(|(id, name)| Project::new(*id, *name, SAMPLE_START, SAMPLE_END))
        .collect()
}

/// A step of the seed sequence that failed without aborting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFailure {
    /// `None` for the cleanup step.
    pub project_id: Option<ProjectId>,
    pub error: String,
}

/// Outcome of [`seed_sample_data`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub removed: usize,
    pub inserted: Vec<ProjectId>,
    pub failures: Vec<SeedFailure>,
}

/// Removes the stale project, ensures the schema and inserts the samples.
///
/// Cleanup runs before the schema exists on a fresh store; that failure is
/// recorded like any other.
///
/// # Errors
/// - Returns an error only when the tables cannot be created.
pub fn seed_sample_data(conn: &Connection) -> RepoResult<SeedReport> {
    let mut report = SeedReport::default();

    let stale = Constraints::new().with_text("name", STALE_PROJECT_NAME);
    match table::delete_where(conn, PROJECTS_TABLE, &stale) {
        Ok(removed) => report.removed = removed,
        Err(err) => {
            warn!(
                "event=seed_cleanup module=seed status=error error={}",
                err
            );
            report.failures.push(SeedFailure {
                project_id: None,
                error: err.to_string(),
            });
        }
    }

    ensure_schema(conn)?;

    let repo = SqliteProjectRepository::new(conn);
    for project in sample_projects() {
        match repo.insert_project(&project) {
            Ok(id) => report.inserted.push(id),
            Err(err) => {
                warn!(
                    "event=seed_insert module=seed status=error project_id={} error={}",
                    project.id, err
                );
                report.failures.push(SeedFailure {
                    project_id: Some(project.id),
                    error: err.to_string(),
                });
            }
        }
    }

    info!(
        "event=seed module=seed status=ok removed={} inserted={} failed={}",
        report.removed,
        report.inserted.len(),
        report.failures.len()
    );
    Ok(report)
}
