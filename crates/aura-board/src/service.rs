//! Board service
//!
//! Entry point for the list/dialog views. Every mutation loads the project,
//! changes a copy through [`RelationshipGraph`], and writes the whole project
//! back with a single `update_project` call.

use crate::config::LayoutConfig;
use crate::error::BoardError;
use crate::picker::{relationships_of, RelationshipPicker, RelationshipRow};
use crate::projection::default_position;
use aura_domain::traits::ProjectRepository;
use aura_domain::{
    CanvasPosition, EdgeChange, Inconsistency, Project, ProjectId, Relationship, RelationshipGraph, Task, TaskId,
    TaskSlot,
};
use std::fmt::Display;

/// Relationship operations over a project repository
pub struct BoardService<R> {
    repository: R,
    layout: LayoutConfig,
}

impl<R> BoardService<R>
where
    R: ProjectRepository,
    R::Error: Display,
{
    /// Create a service with the default layout
    pub fn new(repository: R) -> Self {
        Self::with_layout(repository, LayoutConfig::default())
    }

    /// Create a service placing new tasks with `layout`
    pub fn with_layout(repository: R, layout: LayoutConfig) -> Self {
        Self { repository, layout }
    }

    /// Borrow the repository
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Mutably borrow the repository
    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    /// Give the repository back
    pub fn into_repository(self) -> R {
        self.repository
    }

    /// All projects
    pub fn projects(&self) -> Result<Vec<Project>, BoardError> {
        self.repository.list_projects().map_err(BoardError::repository)
    }

    /// Load a project
    pub fn project(&self, id: &ProjectId) -> Result<Project, BoardError> {
        self.repository
            .get_project(id)
            .map_err(BoardError::repository)?
            .ok_or_else(|| BoardError::ProjectNotFound(id.clone()))
    }

    /// Run `change` on a copy of the project and persist it if it reports a change
    ///
    /// `change` returns its result plus whether the project was modified.
    pub fn modify<T>(&mut self, id: &ProjectId, change: impl FnOnce(&mut Project) -> (T, bool)) -> Result<T, BoardError> {
        let mut project = self.project(id)?;
        let (result, modified) = change(&mut project);
        if modified {
            self.repository
                .update_project(project)
                .map_err(BoardError::repository)?;
            tracing::debug!("Updated project {}", id);
        }
        Ok(result)
    }

    /// Add `edge` to `owner` and its inverse to the other task
    pub fn link(&mut self, id: &ProjectId, owner: &TaskId, edge: Relationship) -> Result<EdgeChange, BoardError> {
        let description = format!("{} {} {}", owner, edge.kind, edge.task_id);
        let change = self.modify(id, |project| {
            let change = project.add_relationship(owner, edge);
            let applied = change.is_applied();
            (change, applied)
        })?;
        log_change("Linked", &description, &change);
        Ok(change)
    }

    /// Commit the picker's selected type from its owner to `target`
    ///
    /// Returns `None` when the picker has no type selected; nothing is saved
    /// and the picker stays as it was.
    pub fn commit_picker(
        &mut self,
        id: &ProjectId,
        picker: &mut RelationshipPicker,
        target: &TaskId,
    ) -> Result<Option<EdgeChange>, BoardError> {
        let description = match picker.selected_type() {
            Some(kind) => format!("{} {} {}", picker.owner(), kind, target),
            None => return Ok(None),
        };
        let change = self.modify(id, |project| {
            let change = picker.commit(project, target);
            let applied = change.as_ref().is_some_and(EdgeChange::is_applied);
            (change, applied)
        })?;
        if let Some(change) = &change {
            log_change("Linked", &description, change);
        }
        Ok(change)
    }

    /// Remove `edge` from `owner` and its inverse from the other task
    pub fn unlink(&mut self, id: &ProjectId, owner: &TaskId, edge: &Relationship) -> Result<EdgeChange, BoardError> {
        let change = self.modify(id, |project| {
            let change = project.remove_relationship(owner, edge);
            let applied = change.is_applied();
            (change, applied)
        })?;
        log_change("Unlinked", &format!("{} {} {}", owner, edge.kind, edge.task_id), &change);
        Ok(change)
    }

    /// Delete a task together with every edge that references it
    pub fn delete_task(&mut self, id: &ProjectId, task: &TaskId) -> Result<Option<Task>, BoardError> {
        let removed = self.modify(id, |project| {
            let removed = project.delete_task(task);
            let modified = removed.is_some();
            (removed, modified)
        })?;
        match &removed {
            Some(_) => tracing::info!("Deleted task {} from project {}", task, id),
            None => tracing::debug!("Task {} not in project {}, nothing deleted", task, id),
        }
        Ok(removed)
    }

    /// Append `task` to a column
    ///
    /// `column` is matched by ID, then by title; `None` means the first
    /// column. A task without a canvas position gets the next free slot of
    /// the default layout.
    pub fn add_task(&mut self, id: &ProjectId, column: Option<&str>, mut task: Task) -> Result<Task, BoardError> {
        let layout = self.layout.clone();
        let added = self.modify(id, |project| {
            let index = match column {
                Some(key) => project.column_index(key),
                None => (!project.columns.is_empty()).then_some(0),
            };
            let Some(column_index) = index else {
                let key = column.unwrap_or("(first column)").to_string();
                return (Err(BoardError::ColumnNotFound(key)), false);
            };
            if project.contains_task(&task.id) {
                return (Err(BoardError::DuplicateTask(task.id.clone())), false);
            }

            let slot = TaskSlot {
                column: column_index,
                index: project.columns[column_index].tasks.len(),
            };
            if task.canvas_position.is_none() {
                task.canvas_position = Some(default_position(slot, &layout));
            }
            project.columns[column_index].tasks.push(task.clone());
            (Ok(task), true)
        })??;

        tracing::info!("Added task {} to project {}", added.id, id);
        Ok(added)
    }

    /// Write a dragged node position back to its task
    pub fn move_task(&mut self, id: &ProjectId, task: &TaskId, position: CanvasPosition) -> Result<(), BoardError> {
        self.modify(id, |project| match project.task_mut(task) {
            Some(found) => {
                found.canvas_position = Some(position);
                (Ok(()), true)
            }
            None => (Err(BoardError::TaskNotFound(task.clone())), false),
        })??;
        tracing::debug!("Moved task {} to ({}, {})", task, position.x, position.y);
        Ok(())
    }

    /// The edges of `task`, with the other tasks' titles
    pub fn relationships_of(&self, id: &ProjectId, task: &TaskId) -> Result<Vec<RelationshipRow>, BoardError> {
        let project = self.project(id)?;
        if !project.contains_task(task) {
            return Err(BoardError::TaskNotFound(task.clone()));
        }
        Ok(relationships_of(&project, task))
    }

    /// Report invariant violations without repairing them
    pub fn check(&self, id: &ProjectId) -> Result<Vec<Inconsistency>, BoardError> {
        Ok(self.project(id)?.check_consistency())
    }
}

fn log_change(action: &str, description: &str, change: &EdgeChange) {
    match change {
        EdgeChange::Applied => tracing::info!("{} {}", action, description),
        EdgeChange::Unchanged(reason) => tracing::warn!("Ignored {}: {}", description, reason),
    }
}
