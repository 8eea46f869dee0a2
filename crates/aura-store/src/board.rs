//! The persisted board document

use crate::StoreError;
use aura_domain::{Project, ProjectId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Root of the board document: `{ "projects": [...], ... }`
///
/// Anything besides `projects` (notes, theme, view settings written by other
/// front ends) is kept in `attributes` and saved back as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    /// Projects in board order
    #[serde(default)]
    pub projects: Vec<Project>,

    /// Other top-level fields
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl BoardState {
    /// Whether `value` is shaped like a board document
    pub fn is_valid_document(value: &Value) -> bool {
        value
            .as_object()
            .and_then(|root| root.get("projects"))
            .is_some_and(Value::is_array)
    }

    /// Decode a board document, checking its shape first
    pub fn from_document(value: Value) -> Result<Self, StoreError> {
        if !value.is_object() {
            return Err(StoreError::InvalidDocument("not an object".to_string()));
        }
        if !Self::is_valid_document(&value) {
            return Err(StoreError::InvalidDocument("projects is not an array".to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Find a project by ID
    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| &project.id == id)
    }

    /// Replace the stored project that has the same ID
    pub fn replace_project(&mut self, project: Project) -> Result<(), StoreError> {
        let slot = self
            .projects
            .iter_mut()
            .find(|existing| existing.id == project.id)
            .ok_or_else(|| StoreError::ProjectNotFound(project.id.clone()))?;
        *slot = project;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_validation() {
        assert!(BoardState::is_valid_document(&json!({ "projects": [] })));
        assert!(!BoardState::is_valid_document(&json!({ "projects": {} })));
        assert!(!BoardState::is_valid_document(&json!({})));
        assert!(!BoardState::is_valid_document(&json!([])));

        assert!(matches!(
            BoardState::from_document(json!("board")),
            Err(StoreError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_extra_fields_are_kept() {
        let doc = json!({ "projects": [], "notes": [{ "id": "n1", "text": "hi" }], "theme": "dark" });
        let state = BoardState::from_document(doc.clone()).unwrap();
        assert_eq!(serde_json::to_value(&state).unwrap(), doc);
    }

    #[test]
    fn test_replace_project() {
        let mut state = BoardState {
            projects: vec![Project::new("p1", "Launch")],
            ..Default::default()
        };

        state.replace_project(Project::new("p1", "Launch v2")).unwrap();
        assert_eq!(state.project(&ProjectId::new("p1")).unwrap().title, "Launch v2");

        let missing = state.replace_project(Project::new("p2", "Other"));
        assert!(matches!(missing, Err(StoreError::ProjectNotFound(_))));
    }
}
