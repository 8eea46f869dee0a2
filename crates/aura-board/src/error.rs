//! Error types for board services

use aura_domain::{ProjectId, TaskId};
use thiserror::Error;

/// Errors surfaced by [`BoardService`](crate::BoardService) and
/// [`CanvasController`](crate::CanvasController)
///
/// Rejected edges are not errors; they come back as
/// [`EdgeChange::Unchanged`](aura_domain::EdgeChange::Unchanged).
#[derive(Error, Debug)]
pub enum BoardError {
    /// The project repository failed
    #[error("Repository error: {0}")]
    Repository(String),

    /// No project with this ID
    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The canvas has no project selected
    #[error("No project selected")]
    NoProjectSelected,

    /// The operation needs a task that is not in the project
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// A task with this ID already exists
    #[error("Task already exists: {0}")]
    DuplicateTask(TaskId),

    /// The project has no column matching the key
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

impl BoardError {
    pub(crate) fn repository(error: impl std::fmt::Display) -> Self {
        BoardError::Repository(error.to_string())
    }
}
