//! Canvas controller
//!
//! Owns what the canvas view holds between events: the selected project and
//! the connection state. Edges committed by the connection protocol go
//! through the same [`BoardService::link`] as the list views.

use crate::config::CanvasConfig;
use crate::connection::{CancelReason, ConnectionEvent, ConnectionState, DismissReason, DropTarget, Outcome, Transition};
use crate::error::BoardError;
use crate::projection::{project_graph, CanvasGraph};
use crate::service::BoardService;
use crate::type_picker::TypeChoice;
use aura_domain::traits::ProjectRepository;
use aura_domain::{AnchorSide, CanvasPosition, EdgeChange, Project, ProjectId, RelationshipType, Task, TaskId};
use std::fmt::Display;

/// State and operations behind the canvas view
pub struct CanvasController<R> {
    service: BoardService<R>,
    config: CanvasConfig,
    project_id: Option<ProjectId>,
    connection: ConnectionState,
}

impl<R> CanvasController<R>
where
    R: ProjectRepository,
    R::Error: Display,
{
    /// Create a controller with no project selected
    pub fn new(repository: R, config: CanvasConfig) -> Self {
        Self {
            service: BoardService::with_layout(repository, config.layout.clone()),
            config,
            project_id: None,
            connection: ConnectionState::Idle,
        }
    }

    /// Borrow the repository
    pub fn repository(&self) -> &R {
        self.service.repository()
    }

    /// Canvas settings in use
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Current connection state
    pub fn connection(&self) -> &ConnectionState {
        &self.connection
    }

    /// Selected project, if any
    pub fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    /// Show another project
    ///
    /// A gesture in progress on the previous project is discarded.
    pub fn select_project(&mut self, id: ProjectId) -> Result<CanvasGraph, BoardError> {
        let project = self.service.project(&id)?;
        if self.project_id.as_ref() != Some(&id) {
            self.interrupt(CancelReason::ProjectSwitched);
            tracing::debug!("Canvas switched to project {}", id);
        }
        self.project_id = Some(id);
        Ok(project_graph(&project, &self.config))
    }

    /// Load the selected project
    pub fn project(&self) -> Result<Project, BoardError> {
        self.service.project(self.selected()?)
    }

    /// Derive the graph of the selected project
    pub fn graph(&self) -> Result<CanvasGraph, BoardError> {
        Ok(project_graph(&self.project()?, &self.config))
    }

    /// A connection drag started from `handle` of `task`
    pub fn begin_connection(&mut self, task: TaskId, handle: AnchorSide) -> Result<Outcome, BoardError> {
        let (outcome, _) = self.dispatch(ConnectionEvent::DragStarted { task_id: task, handle })?;
        Ok(outcome)
    }

    /// The connection drag was released over `target`, or over nothing
    pub fn release_connection(&mut self, target: Option<DropTarget>) -> Result<Outcome, BoardError> {
        let (outcome, _) = self.dispatch(ConnectionEvent::Released(target))?;
        Ok(outcome)
    }

    /// The type picker answered with `kind`
    ///
    /// Returns what the relationship store did with the edge, or `None` when
    /// nothing was committed.
    pub fn select_type(&mut self, kind: RelationshipType) -> Result<Option<EdgeChange>, BoardError> {
        let (_, change) = self.answer(TypeChoice::Selected(kind))?;
        Ok(change)
    }

    /// Feed the type picker's answer to the connection
    pub fn answer(&mut self, choice: TypeChoice) -> Result<(Outcome, Option<EdgeChange>), BoardError> {
        self.dispatch(choice.into())
    }

    /// The type picker was closed without a choice
    pub fn dismiss(&mut self, reason: DismissReason) -> Outcome {
        self.interrupt(CancelReason::Dismissed(reason))
    }

    /// A node drag finished at `position`
    ///
    /// Returns the stored position, snapped to the grid when enabled.
    pub fn move_node(&mut self, task: &TaskId, position: CanvasPosition) -> Result<CanvasPosition, BoardError> {
        let id = self.selected()?.clone();
        let position = self.config.snap(position);
        self.service.move_task(&id, task, position)?;
        Ok(position)
    }

    /// Delete a task and every edge that references it
    pub fn delete_task(&mut self, task: &TaskId) -> Result<Option<Task>, BoardError> {
        let id = self.selected()?.clone();
        let removed = self.service.delete_task(&id, task)?;
        if removed.is_some() {
            let Transition { state, outcome } = std::mem::take(&mut self.connection).task_deleted(task);
            self.connection = state;
            if let Outcome::Cancelled(reason) = outcome {
                tracing::debug!("Connection cancelled: {}", reason);
            }
        }
        Ok(removed)
    }

    /// The canvas is going away; drop the gesture and the selection
    pub fn unmount(&mut self) -> Outcome {
        let outcome = self.interrupt(CancelReason::Unmounted);
        self.project_id = None;
        outcome
    }

    fn selected(&self) -> Result<&ProjectId, BoardError> {
        self.project_id.as_ref().ok_or(BoardError::NoProjectSelected)
    }

    fn interrupt(&mut self, reason: CancelReason) -> Outcome {
        let Transition { state, outcome } = std::mem::take(&mut self.connection).cancel(reason);
        self.connection = state;
        if let Outcome::Cancelled(reason) = &outcome {
            tracing::debug!("Connection cancelled: {}", reason);
        }
        outcome
    }

    fn dispatch(&mut self, event: ConnectionEvent) -> Result<(Outcome, Option<EdgeChange>), BoardError> {
        let id = self.selected()?.clone();
        let project = self.service.project(&id)?;

        let Transition { state, outcome } = std::mem::take(&mut self.connection).apply(event, &project);
        self.connection = state;
        tracing::debug!("Connection state now {:?}", self.connection);

        let change = match &outcome {
            Outcome::Commit(request) => Some(self.service.link(&id, &request.owner, request.edge.clone())?),
            Outcome::Cancelled(reason) => {
                tracing::debug!("Connection cancelled: {}", reason);
                None
            }
            _ => None,
        };
        Ok((outcome, change))
    }
}
