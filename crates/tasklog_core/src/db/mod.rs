//! SQLite connection management and schema bootstrap.
//!
//! # Responsibility
//! - Open, configure and close the file-backed store.
//! - Create the `projects` and `tasks` tables idempotently.
//!
//! # Invariants
//! - Every statement auto-commits; no transaction is held across calls.
//! - CRUD helpers assume `ensure_schema` succeeded on the same store.
//!
//! # See also
//! - crate::repo for data access on top of the returned connection.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{close_db, open_db, open_db_in_memory, open_db_with, OpenOptions};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The store refused to release the handle (e.g. unfinalized statements).
    Close(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Close(err) => write!(f, "failed to close database: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Close(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
