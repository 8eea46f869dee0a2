//! Aura Domain Layer
//!
//! This crate contains the task relationship model shared by every other Aura
//! crate. It performs no I/O and holds no global state: projects come in, get
//! mutated, and go back out through the [`traits::ProjectRepository`] port.
//!
//! ## Key Concepts
//!
//! - **Task**: a card on the board, owning its list of outgoing relationship edges
//! - **Relationship**: a typed, directed edge recorded on the task that owns it
//! - **Inverse**: the edge recorded on the other endpoint (blocks ↔ blocked-by)
//! - **Registry**: the fixed catalogue of relationship types and their metadata
//! - **Relationship graph**: the mutation API that keeps both ends of every edge in sync
//!
//! ## Invariant
//!
//! For every stored edge `(A, type, B)` there is an edge `(B, inverse(type), A)`.
//! Only [`graph::RelationshipGraph`] should add or remove edges; it applies both
//! sides in one call so no reader ever sees a one-sided pair.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod graph;
pub mod project;
pub mod registry;
pub mod relationship;
pub mod task;
pub mod traits;

// Re-exports for convenience
pub use graph::{EdgeChange, Inconsistency, NoOpReason, RelationshipGraph};
pub use project::{Column, Project, ProjectId, TaskSlot};
pub use registry::TypeInfo;
pub use relationship::{AnchorSide, Relationship, RelationshipType};
pub use task::{CanvasPosition, HierarchyType, Task, TaskId};
