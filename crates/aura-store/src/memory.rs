//! In-memory repository

use crate::StoreError;
use aura_domain::traits::ProjectRepository;
use aura_domain::{Project, ProjectId};

/// Repository over a plain list of projects
///
/// Counts `update_project` calls so tests can assert that a mutation was
/// persisted exactly once.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    projects: Vec<Project>,
    updates: usize,
}

impl MemoryStore {
    /// Create a store holding `projects`
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects, updates: 0 }
    }

    /// Borrow the stored projects
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Number of successful `update_project` calls
    pub fn update_count(&self) -> usize {
        self.updates
    }
}

impl ProjectRepository for MemoryStore {
    type Error = StoreError;

    fn list_projects(&self) -> Result<Vec<Project>, Self::Error> {
        Ok(self.projects.clone())
    }

    fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, Self::Error> {
        Ok(self.projects.iter().find(|project| &project.id == id).cloned())
    }

    fn update_project(&mut self, project: Project) -> Result<(), Self::Error> {
        let slot = self
            .projects
            .iter_mut()
            .find(|existing| existing.id == project.id)
            .ok_or_else(|| StoreError::ProjectNotFound(project.id.clone()))?;
        *slot = project;
        self.updates += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_replaces_project() {
        let mut store = MemoryStore::new(vec![Project::new("p1", "Launch")]);
        store.update_project(Project::new("p1", "Launch v2")).unwrap();

        let project = store.get_project(&ProjectId::new("p1")).unwrap().unwrap();
        assert_eq!(project.title, "Launch v2");
        assert_eq!(store.update_count(), 1);
    }

    #[test]
    fn test_update_unknown_project_fails() {
        let mut store = MemoryStore::default();
        let result = store.update_project(Project::new("ghost", "Ghost"));
        assert!(matches!(result, Err(StoreError::ProjectNotFound(_))));
        assert_eq!(store.update_count(), 0);
        assert!(store.get_project(&ProjectId::new("ghost")).unwrap().is_none());
    }
}
