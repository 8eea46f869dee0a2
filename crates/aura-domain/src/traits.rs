//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Implementations live in `aura-store`.

use crate::project::{Project, ProjectId};

/// Access to the surrounding project data
///
/// The relationship core never persists directly: every mutation ends with
/// one `update_project` call carrying the whole updated project.
pub trait ProjectRepository {
    /// Error type for repository operations
    type Error;

    /// All projects, in board order
    fn list_projects(&self) -> Result<Vec<Project>, Self::Error>;

    /// Get a project by ID
    fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, Self::Error>;

    /// Replace a stored project with an updated copy
    fn update_project(&mut self, project: Project) -> Result<(), Self::Error>;
}
