//! Project record.

use crate::model::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

pub type ProjectId = i64;

/// One row of the `projects` table.
///
/// `id` is chosen by the caller; the store does not assign it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Free-form text, no date format is enforced.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl Project {
    pub fn new(
        id: ProjectId,
        name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
        }
    }

    /// Checks invariants required before insert.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("project", "name", &self.name)
    }
}
