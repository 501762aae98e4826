//! Task records.
//!
//! # Invariants
//! - `project_id` must point at an existing project; the store enforces this
//!   only when foreign keys are enabled on the connection.
//! - `status` is free text. The constants in [`status`] are conventions, not
//!   an enforced set.

use crate::model::project::ProjectId;
use crate::model::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

pub type TaskId = i64;

/// Conventional status values.
pub mod status {
    pub const TODO: &str = "todo";
    pub const IN_PROGRESS: &str = "in progress";
    pub const DONE: &str = "done";
}

/// Task data for insert; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub project_id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
}

impl NewTask {
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        status: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            name: name.into(),
            description: None,
            status: status.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks invariants required before insert.
    ///
    /// The length bounds of `name`/`status` are left to the column
    /// definition.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("task", "name", &self.name)?;
        require_text("task", "status", &self.status)?;
        require_text("task", "start_date", &self.start_date)?;
        require_text("task", "end_date", &self.end_date)?;
        Ok(())
    }
}

/// One row of the `tasks` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
}

impl Task {
    /// Pairs insert data with its store-assigned id.
    pub fn from_new(id: TaskId, task: NewTask) -> Self {
        Self {
            id,
            project_id: task.project_id,
            name: task.name,
            description: task.description,
            status: task.status,
            start_date: task.start_date,
            end_date: task.end_date,
        }
    }
}
