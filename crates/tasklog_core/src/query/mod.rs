//! Parameterized SQL construction for the generic CRUD helpers.
//!
//! # Responsibility
//! - Turn a table name plus an ordered column→value mapping into SQL text
//!   and a matching list of bound values.
//!
//! # Invariants
//! - Values are never spliced into SQL text; only identifiers are.
//! - Identifiers must match `^[A-Za-z_][A-Za-z0-9_]*$`. They are meant to come
//!   from internal constants, and anything else is rejected rather than
//!   quoted.
//! - Placeholder count always equals parameter count, in mapping order.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod builder;
mod constraints;

pub use builder::{
    delete_all, delete_where, select_all, select_where, update_by_id, BuiltQuery,
};
pub use constraints::Constraints;

pub type QueryResult<T> = Result<T, QueryError>;

/// Precondition violation detected while building SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A predicate or change set had no entries.
    EmptyConstraints { operation: &'static str },
    /// A table or column name is not a plain SQL identifier.
    InvalidIdentifier(String),
    /// Generated SQL and bound values disagree.
    PlaceholderMismatch { placeholders: usize, params: usize },
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyConstraints { operation } => {
                write!(f, "{operation} requires at least one column")
            }
            Self::InvalidIdentifier(name) => write!(f, "invalid SQL identifier `{name}`"),
            Self::PlaceholderMismatch {
                placeholders,
                params,
            } => write!(
                f,
                "query has {placeholders} placeholders but {params} bound values"
            ),
        }
    }
}

impl Error for QueryError {}
