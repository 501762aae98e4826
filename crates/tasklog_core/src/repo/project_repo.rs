//! Project repository contracts and SQLite implementation.

use crate::db::schema::PROJECTS_TABLE;
use crate::model::project::{Project, ProjectId};
use crate::query::{self, BuiltQuery, Constraints};
use crate::repo::RepoResult;
use rusqlite::{params, params_from_iter, Connection, Row};

/// Repository interface for project persistence.
pub trait ProjectRepository {
    /// Inserts a project with its caller-supplied id and returns that id.
    fn insert_project(&self, project: &Project) -> RepoResult<ProjectId>;
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    /// Projects where every constraint column equals its value.
    fn find_projects(&self, constraints: &Constraints) -> RepoResult<Vec<Project>>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_projects(&self, query: &BuiltQuery) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(query.sql())?;
        let projects = stmt
            .query_map(params_from_iter(query.params()), parse_project_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(projects)
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn insert_project(&self, project: &Project) -> RepoResult<ProjectId> {
        project.validate()?;

        self.conn.execute(
            "INSERT INTO projects (id, name, start_date, end_date)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                project.id,
                project.name.as_str(),
                project.start_date.as_deref(),
                project.end_date.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        self.query_projects(&query::select_all(PROJECTS_TABLE)?)
    }

    fn find_projects(&self, constraints: &Constraints) -> RepoResult<Vec<Project>> {
        self.query_projects(&query::select_where(PROJECTS_TABLE, constraints)?)
    }
}

fn parse_project_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
    })
}
