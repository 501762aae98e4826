//! Data access on top of an open, schema-initialized connection.
//!
//! # Responsibility
//! - Typed inserts and listings for projects and tasks.
//! - Generic select/update/delete helpers for any managed table.
//!
//! # Invariants
//! - Writes validate the record before SQL runs.
//! - Each call is one auto-committed statement; a failure leaves earlier
//!   calls in place.
//! - Nothing is cached; every read goes back to the store.

use crate::db::DbError;
use crate::model::ValidationError;
use crate::query::QueryError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod project_repo;
pub mod table;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Query(QueryError),
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Query(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Query(err) => Some(err),
            Self::Db(err) => Some(err),
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<QueryError> for RepoError {
    fn from(value: QueryError) -> Self {
        Self::Query(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
