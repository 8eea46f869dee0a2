//! Aura Board
//!
//! Application layer between the board views and the relationship core.
//!
//! # Overview
//!
//! - **Connection protocol**: the two-phase gesture that draws an edge on the
//!   canvas (drag from an anchor, drop on another task, pick a type)
//! - **Canvas projection**: the render-ready node/edge graph of one project
//! - **Relationship picker**: the list/dialog way of browsing and adding edges
//! - **Services**: [`BoardService`] and [`CanvasController`] load a project
//!   through a [`ProjectRepository`](aura_domain::traits::ProjectRepository),
//!   mutate it through [`RelationshipGraph`](aura_domain::RelationshipGraph),
//!   and hand the whole project back with one `update_project` call
//!
//! # Usage
//!
//! ```
//! use aura_board::{CanvasConfig, CanvasController, DropTarget};
//! use aura_domain::{AnchorSide, Column, Project, RelationshipType, Task, TaskId};
//! use aura_domain::traits::ProjectRepository;
//! # use aura_domain::ProjectId;
//! # struct Repo(Vec<Project>);
//! # impl ProjectRepository for Repo {
//! #     type Error = std::convert::Infallible;
//! #     fn list_projects(&self) -> Result<Vec<Project>, Self::Error> { Ok(self.0.clone()) }
//! #     fn get_project(&self, id: &ProjectId) -> Result<Option<Project>, Self::Error> {
//! #         Ok(self.0.iter().find(|p| &p.id == id).cloned())
//! #     }
//! #     fn update_project(&mut self, project: Project) -> Result<(), Self::Error> {
//! #         for p in &mut self.0 { if p.id == project.id { *p = project.clone(); } }
//! #         Ok(())
//! #     }
//! # }
//!
//! # fn main() -> Result<(), aura_board::BoardError> {
//! let project = Project::new("p1", "Launch").with_column(
//!     Column::new("todo", "To Do")
//!         .with_task(Task::new("design", "Design API"))
//!         .with_task(Task::new("impl", "Implement API")),
//! );
//! let mut canvas = CanvasController::new(Repo(vec![project]), CanvasConfig::default());
//! canvas.select_project("p1".into())?;
//!
//! canvas.begin_connection(TaskId::new("design"), AnchorSide::Right)?;
//! canvas.release_connection(Some(DropTarget::new("impl", AnchorSide::Left)))?;
//! canvas.select_type(RelationshipType::Blocks)?;
//!
//! assert_eq!(canvas.graph()?.edges.len(), 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod connection;
mod controller;
mod error;
mod picker;
mod projection;
mod service;
mod type_picker;

pub use config::{CanvasConfig, LayoutConfig};
pub use connection::{
    CancelReason, ConnectionEvent, ConnectionRequest, ConnectionState, DismissReason, DropTarget, Outcome,
    PendingConnection, Transition,
};
pub use controller::CanvasController;
pub use error::BoardError;
pub use picker::{relationships_of, RelationshipPicker, RelationshipRow};
pub use projection::{
    anchor_point, default_position, project_graph, Badge, CanvasEdge, CanvasGraph, CanvasNode, NodeData,
};
pub use service::BoardService;
pub use type_picker::{TypeChoice, TypePrompt};
