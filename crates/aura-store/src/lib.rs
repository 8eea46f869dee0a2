//! Aura Storage Layer
//!
//! Implements the [`ProjectRepository`](aura_domain::traits::ProjectRepository)
//! port for the relationship core.
//!
//! # Backends
//!
//! - [`MemoryStore`]: a plain vector of projects, for tests and embedding
//! - [`JsonFileStore`]: the board document on disk, with a rolling backup
//!
//! # Examples
//!
//! ```no_run
//! use aura_domain::traits::ProjectRepository;
//! use aura_store::{JsonFileStore, StoreConfig};
//!
//! let store = JsonFileStore::open(&StoreConfig::new("board.json")).unwrap();
//! for project in store.list_projects().unwrap() {
//!     println!("{} ({} tasks)", project.title, project.task_count());
//! }
//! ```

#![warn(missing_docs)]

mod board;
mod json_file;
mod memory;

pub use board::BoardState;
pub use json_file::{JsonFileStore, LoadSource, StoreConfig};
pub use memory::MemoryStore;

use aura_domain::ProjectId;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON that is not a board document
    #[error("Invalid board document: {0}")]
    InvalidDocument(String),

    /// A board file exists but cannot be loaded, and no backup could replace it
    #[error("Cannot load board {}: {reason}", path.display())]
    Unreadable {
        /// File that failed to load
        path: std::path::PathBuf,
        /// Decode or read error
        reason: String,
    },

    /// Project not found
    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),
}
