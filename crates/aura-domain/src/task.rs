//! Task module - the cards that relationships connect

use crate::relationship::{Relationship, RelationshipType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier of a task
///
/// Ids are opaque strings. Boards written by older front ends use values such
/// as `task-1700000000000` or bare timestamps, so the id is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh identifier for a newly created task
    ///
    /// # Examples
    ///
    /// ```
    /// use aura_domain::TaskId;
    ///
    /// let a = TaskId::generate();
    /// let b = TaskId::generate();
    /// assert!(a.as_str().starts_with("task-"));
    /// assert_ne!(a, b);
    /// ```
    pub fn generate() -> Self {
        Self(format!("task-{}", uuid::Uuid::now_v7()))
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Level of a task in the work breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HierarchyType {
    /// A large body of work that can be broken down into smaller stories
    Epic,

    /// A user-focused feature or enhancement that delivers value
    Story,

    /// A specific piece of work that needs to be done
    #[default]
    Task,
}

impl HierarchyType {
    /// Get the persisted name
    pub fn as_str(&self) -> &'static str {
        match self {
            HierarchyType::Epic => "epic",
            HierarchyType::Story => "story",
            HierarchyType::Task => "task",
        }
    }

    /// Human label
    pub fn label(&self) -> &'static str {
        match self {
            HierarchyType::Epic => "Epic",
            HierarchyType::Story => "Story",
            HierarchyType::Task => "Task",
        }
    }

    /// Parse a hierarchy type (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "epic" => Some(HierarchyType::Epic),
            "story" => Some(HierarchyType::Story),
            "task" => Some(HierarchyType::Task),
            _ => None,
        }
    }
}

impl std::str::FromStr for HierarchyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid hierarchy type: {}", s))
    }
}

/// Last-known layout coordinate of a task on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPosition {
    /// Horizontal offset
    pub x: f64,
    /// Vertical offset
    pub y: f64,
}

impl CanvasPosition {
    /// Create a position
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A task card
///
/// Only the fields the relationship core reads are typed. Everything else the
/// board stores on a task (description, dates, priority, labels, status...)
/// lives in `attributes` and is written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Title shown on the card
    #[serde(default)]
    pub title: String,

    /// Epic, story or task
    #[serde(default)]
    pub hierarchy_type: HierarchyType,

    /// Outgoing edges, recorded from this task's point of view
    #[serde(default)]
    pub relationships: Vec<Relationship>,

    /// Canvas placement, independent of the board column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_position: Option<CanvasPosition>,

    /// Attributes opaque to the relationship core
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Task {
    /// Create a task with no relationships and no canvas position
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            hierarchy_type: HierarchyType::default(),
            relationships: Vec::new(),
            canvas_position: None,
            attributes: Map::new(),
        }
    }

    /// Builder: set the hierarchy type
    #[must_use]
    pub fn with_hierarchy(mut self, hierarchy_type: HierarchyType) -> Self {
        self.hierarchy_type = hierarchy_type;
        self
    }

    /// Builder: set the canvas position
    #[must_use]
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.canvas_position = Some(CanvasPosition::new(x, y));
        self
    }

    /// Whether this task holds the edge `(self, kind, other)`
    pub fn has_edge(&self, kind: RelationshipType, other: &TaskId) -> bool {
        self.relationships.iter().any(|rel| rel.matches(kind, other))
    }

    /// Edges of this task that point at `other`
    pub fn edges_to<'a>(&'a self, other: &'a TaskId) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.relationships.iter().filter(move |rel| &rel.task_id == other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_defaults_when_fields_absent() {
        let task: Task = serde_json::from_value(json!({ "id": "task-1", "title": "Design API" })).unwrap();

        assert_eq!(task.hierarchy_type, HierarchyType::Task);
        assert!(task.relationships.is_empty());
        assert!(task.canvas_position.is_none());
    }

    #[test]
    fn test_opaque_attributes_survive_round_trip() {
        let raw = json!({
            "id": "1700000000000",
            "title": "Implement API",
            "description": "wire the handlers",
            "priority": "high",
            "labels": [{ "id": "label-1", "text": "backend", "color": "blue" }],
            "hierarchyType": "story",
            "canvasPosition": { "x": 400.0, "y": 250.0 }
        });

        let task: Task = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(task.hierarchy_type, HierarchyType::Story);
        assert_eq!(task.canvas_position, Some(CanvasPosition::new(400.0, 250.0)));
        assert_eq!(task.attributes["priority"], "high");

        let mut back = serde_json::to_value(&task).unwrap();
        back.as_object_mut().unwrap().remove("relationships");
        assert_eq!(back, raw);
    }

    #[test]
    fn test_hierarchy_parsing() {
        assert_eq!(HierarchyType::parse("Epic"), Some(HierarchyType::Epic));
        assert_eq!(HierarchyType::parse("STORY"), Some(HierarchyType::Story));
        assert!("bug".parse::<HierarchyType>().is_err());
        assert_eq!(HierarchyType::Story.label(), "Story");
    }
}
