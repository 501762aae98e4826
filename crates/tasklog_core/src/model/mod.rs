//! Typed records for the two persisted entities.
//!
//! # Responsibility
//! - Define the in-memory shape of `projects` and `tasks` rows.
//! - Check the non-empty invariants before anything is written.
//!
//! # Invariants
//! - Records are plain values; the store stays the single source of truth
//!   and nothing here caches rows between reads.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod project;
pub mod task;

/// Model invariant violation detected before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace-only.
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { entity, field } => {
                write!(f, "{entity}.{field} must not be empty")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { entity, field });
    }
    Ok(())
}
