//! Project module - the board structure that owns the tasks
//!
//! The relationship core does not own projects or columns; it reads and
//! rewrites the tasks inside them.

use crate::task::{Task, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier of a project
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A board column ("To Do", "In Progress", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column identifier
    #[serde(default)]
    pub id: String,

    /// Column title; doubles as the status of its tasks
    pub title: String,

    /// Column color
    #[serde(default)]
    pub color: String,

    /// Tasks in display order
    #[serde(default)]
    pub tasks: Vec<Task>,

    /// Fields opaque to the relationship core
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Column {
    /// Create an empty column
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color: String::new(),
            tasks: Vec::new(),
            attributes: Map::new(),
        }
    }

    /// Builder: append a task
    #[must_use]
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }
}

/// A project board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,

    /// Project title
    #[serde(default)]
    pub title: String,

    /// Accent color
    #[serde(default)]
    pub color: String,

    /// Columns in display order
    #[serde(default)]
    pub columns: Vec<Column>,

    /// Fields opaque to the relationship core
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Location of a task inside its project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSlot {
    /// Index of the column
    pub column: usize,
    /// Index of the task within the column
    pub index: usize,
}

impl Project {
    /// Create an empty project
    pub fn new(id: impl Into<ProjectId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color: String::new(),
            columns: Vec::new(),
            attributes: Map::new(),
        }
    }

    /// Builder: append a column
    #[must_use]
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// All tasks, column by column
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flat_map(|column| column.tasks.iter())
    }

    /// All tasks, mutably
    pub fn tasks_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.columns.iter_mut().flat_map(|column| column.tasks.iter_mut())
    }

    /// Number of tasks across all columns
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|column| column.tasks.len()).sum()
    }

    /// Find a task by id
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks().find(|task| &task.id == id)
    }

    /// Find a task by id, mutably
    pub fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks_mut().find(|task| &task.id == id)
    }

    /// Whether the project contains the task
    pub fn contains_task(&self, id: &TaskId) -> bool {
        self.task(id).is_some()
    }

    /// Column and index of a task
    pub fn locate(&self, id: &TaskId) -> Option<TaskSlot> {
        self.columns.iter().enumerate().find_map(|(column, col)| {
            col.tasks
                .iter()
                .position(|task| &task.id == id)
                .map(|index| TaskSlot { column, index })
        })
    }

    /// Find a column by id or, failing that, by title (case-insensitive)
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.id == key)
            .or_else(|| {
                self.columns
                    .iter()
                    .position(|column| column.title.eq_ignore_ascii_case(key))
            })
    }

    /// Detach a task from its column
    ///
    /// This does not touch edges on other tasks; use
    /// [`RelationshipGraph::delete_task`](crate::graph::RelationshipGraph::delete_task)
    /// to delete a task without leaving dangling references.
    pub fn take_task(&mut self, id: &TaskId) -> Option<Task> {
        let slot = self.locate(id)?;
        Some(self.columns[slot.column].tasks.remove(slot.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Project {
        Project::new("p1", "Launch")
            .with_column(
                Column::new("todo", "To Do")
                    .with_task(Task::new("a", "Design API"))
                    .with_task(Task::new("b", "Write docs")),
            )
            .with_column(Column::new("doing", "In Progress").with_task(Task::new("c", "Implement API")))
    }

    #[test]
    fn test_locate_and_lookup() {
        let project = sample();
        assert_eq!(project.task_count(), 3);
        assert_eq!(project.locate(&TaskId::new("c")), Some(TaskSlot { column: 1, index: 0 }));
        assert_eq!(project.locate(&TaskId::new("b")), Some(TaskSlot { column: 0, index: 1 }));
        assert!(project.locate(&TaskId::new("zzz")).is_none());
        assert_eq!(project.task(&TaskId::new("a")).unwrap().title, "Design API");
    }

    #[test]
    fn test_column_index_by_id_or_title() {
        let project = sample();
        assert_eq!(project.column_index("doing"), Some(1));
        assert_eq!(project.column_index("to do"), Some(0));
        assert_eq!(project.column_index("Done"), None);
    }

    #[test]
    fn test_take_task() {
        let mut project = sample();
        let taken = project.take_task(&TaskId::new("a")).unwrap();
        assert_eq!(taken.title, "Design API");
        assert!(!project.contains_task(&TaskId::new("a")));
        assert!(project.take_task(&TaskId::new("a")).is_none());
    }
}
