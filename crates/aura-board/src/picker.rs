//! Relationship picker
//!
//! The list/dialog way into the relationship store: choose a type, filter the
//! other tasks by title, pick one. Edges added here carry the default anchors
//! so they are stored exactly like a canvas edge drawn right-to-left.

use aura_domain::registry::{self, TypeInfo};
use aura_domain::{AnchorSide, EdgeChange, Project, Relationship, RelationshipGraph, RelationshipType, Task, TaskId};
use serde::Serialize;

/// Picker state for one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipPicker {
    owner: TaskId,
    open: bool,
    selected_type: Option<RelationshipType>,
    query: String,
}

impl RelationshipPicker {
    /// Closed picker for `owner`
    pub fn new(owner: impl Into<TaskId>) -> Self {
        Self {
            owner: owner.into(),
            open: false,
            selected_type: None,
            query: String::new(),
        }
    }

    /// Task the picker adds edges to
    pub fn owner(&self) -> &TaskId {
        &self.owner
    }

    /// Whether the dropdown is showing
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Type chosen so far
    pub fn selected_type(&self) -> Option<RelationshipType> {
        self.selected_type
    }

    /// Current search text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Show the dropdown
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the dropdown and forget the type and search text
    pub fn close(&mut self) {
        self.open = false;
        self.selected_type = None;
        self.query.clear();
    }

    /// Choose the type of the edge to add
    pub fn select_type(&mut self, kind: RelationshipType) {
        self.selected_type = Some(kind);
    }

    /// Set the title filter
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Tasks that can be picked
    ///
    /// Excludes the owner itself and, once a type is chosen, tasks the owner
    /// already has an edge of that type to. The query matches titles as a
    /// case-insensitive substring.
    pub fn candidates<'a>(&self, project: &'a Project) -> Vec<&'a Task> {
        let needle = self.query.trim().to_lowercase();
        let owner = project.task(&self.owner);

        project
            .tasks()
            .filter(|task| task.id != self.owner)
            .filter(|task| match (self.selected_type, owner) {
                (Some(kind), Some(owner)) => !owner.has_edge(kind, &task.id),
                _ => true,
            })
            .filter(|task| needle.is_empty() || task.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Add an edge of the selected type from the owner to `target`
    ///
    /// Returns `None` and stays open when no type is selected; otherwise the
    /// picker closes.
    pub fn commit(&mut self, project: &mut Project, target: &TaskId) -> Option<EdgeChange> {
        let kind = self.selected_type?;
        let edge = Relationship::new(kind, target.clone()).with_handles(AnchorSide::DEFAULT_SOURCE, AnchorSide::DEFAULT_TARGET);
        let change = project.add_relationship(&self.owner, edge);
        self.close();
        Some(change)
    }
}

/// One line of a task's relationship listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipRow {
    /// The stored edge
    pub edge: Relationship,
    /// Registry entry of its type
    #[serde(skip)]
    pub info: &'static TypeInfo,
    /// Title of the other task; `None` when the reference is dangling
    pub other_title: Option<String>,
}

/// List the edges of `task` with the other task's title resolved
///
/// Returns an empty list when the task is not in the project.
pub fn relationships_of(project: &Project, task: &TaskId) -> Vec<RelationshipRow> {
    let Some(owner) = project.task(task) else {
        return Vec::new();
    };
    owner
        .relationships
        .iter()
        .map(|edge| RelationshipRow {
            edge: edge.clone(),
            info: registry::info(edge.kind),
            other_title: project.task(&edge.task_id).map(|other| other.title.clone()),
        })
        .collect()
}
