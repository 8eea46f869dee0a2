//! Relationship module - typed, directed edges between tasks

use crate::registry;
use crate::task::TaskId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of relationship between two tasks
///
/// The set is closed. Persisted boards that carry any other id fail to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipType {
    /// This task blocks the other task
    Blocks,

    /// This task is blocked by the other task
    BlockedBy,

    /// This task is related to the other task
    RelatesTo,

    /// This task duplicates the other task
    Duplicates,

    /// This task is a parent of the other task
    ParentOf,

    /// This task is a child of the other task
    ChildOf,
}

impl RelationshipType {
    /// Every relationship type, in catalogue order
    pub const ALL: [RelationshipType; 6] = [
        RelationshipType::Blocks,
        RelationshipType::BlockedBy,
        RelationshipType::RelatesTo,
        RelationshipType::Duplicates,
        RelationshipType::ParentOf,
        RelationshipType::ChildOf,
    ];

    /// Persisted identifier (`blocks`, `blocked-by`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::Blocks => "blocks",
            RelationshipType::BlockedBy => "blocked-by",
            RelationshipType::RelatesTo => "relates-to",
            RelationshipType::Duplicates => "duplicates",
            RelationshipType::ParentOf => "parent-of",
            RelationshipType::ChildOf => "child-of",
        }
    }

    /// Parse a persisted identifier
    ///
    /// Underscores are accepted in place of dashes for command-line input.
    pub fn parse(s: &str) -> Option<Self> {
        registry::try_lookup(&s.to_lowercase().replace('_', "-")).map(|entry| entry.kind)
    }

    /// Type recorded on the opposite endpoint
    pub fn inverse(&self) -> RelationshipType {
        registry::info(*self).inverse
    }

    /// Whether the inverse is the type itself (relates-to, duplicates)
    pub fn is_self_inverse(&self) -> bool {
        self.inverse() == *self
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationshipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid relationship type: {}", s))
    }
}

/// One of the four attachment points of a canvas node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSide {
    /// Top edge
    Top,
    /// Right edge
    Right,
    /// Bottom edge
    Bottom,
    /// Left edge
    Left,
}

impl AnchorSide {
    /// Every side, clockwise from the top
    pub const ALL: [AnchorSide; 4] = [AnchorSide::Top, AnchorSide::Right, AnchorSide::Bottom, AnchorSide::Left];

    /// Side used for the source end of an edge with no recorded handle
    pub const DEFAULT_SOURCE: AnchorSide = AnchorSide::Right;

    /// Side used for the target end of an edge with no recorded handle
    pub const DEFAULT_TARGET: AnchorSide = AnchorSide::Left;

    /// Get the side name
    pub fn as_str(&self) -> &'static str {
        match self {
            AnchorSide::Top => "top",
            AnchorSide::Right => "right",
            AnchorSide::Bottom => "bottom",
            AnchorSide::Left => "left",
        }
    }

    /// Parse a side name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "top" => Some(AnchorSide::Top),
            "right" => Some(AnchorSide::Right),
            "bottom" => Some(AnchorSide::Bottom),
            "left" => Some(AnchorSide::Left),
            _ => None,
        }
    }

    /// Widget handle id for this side of `task` (`<taskId>-<side>`)
    pub fn handle_id(&self, task: &TaskId) -> String {
        format!("{}-{}", task, self.as_str())
    }

    /// Extract the side from a widget handle id
    ///
    /// Task ids may themselves contain dashes, so only the last segment is read.
    ///
    /// # Examples
    ///
    /// ```
    /// use aura_domain::AnchorSide;
    ///
    /// assert_eq!(AnchorSide::from_handle_id("task-42-bottom"), Some(AnchorSide::Bottom));
    /// assert_eq!(AnchorSide::from_handle_id("task-42"), None);
    /// ```
    pub fn from_handle_id(handle: &str) -> Option<Self> {
        handle.rsplit_once('-').and_then(|(_, side)| Self::parse(side))
    }
}

impl fmt::Display for AnchorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnchorSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid anchor side: {}", s))
    }
}

/// A directed edge, stored in the relationship list of the task that owns it
///
/// Two edges are the same edge when `kind` and `task_id` match; anchors are
/// rendering hints and do not take part in identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Relationship type, as seen from the owning task
    #[serde(rename = "type")]
    pub kind: RelationshipType,

    /// The other endpoint
    pub task_id: TaskId,

    /// Anchor on the owning task's node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<AnchorSide>,

    /// Anchor on the other task's node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<AnchorSide>,
}

impl Relationship {
    /// Create an edge with no anchor metadata
    pub fn new(kind: RelationshipType, task_id: impl Into<TaskId>) -> Self {
        Self {
            kind,
            task_id: task_id.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    /// Builder: record the anchors used when the edge was drawn
    #[must_use]
    pub fn with_handles(mut self, source: AnchorSide, target: AnchorSide) -> Self {
        self.source_handle = Some(source);
        self.target_handle = Some(target);
        self
    }

    /// Whether this is the edge `(_, kind, other)`
    pub fn matches(&self, kind: RelationshipType, other: &TaskId) -> bool {
        self.kind == kind && &self.task_id == other
    }

    /// The edge to record on the other endpoint, pointing back at `owner`
    ///
    /// Anchors swap sides so both records describe the same drawn line.
    pub fn inverse_for(&self, owner: &TaskId) -> Relationship {
        Relationship {
            kind: self.kind.inverse(),
            task_id: owner.clone(),
            source_handle: self.target_handle,
            target_handle: self.source_handle,
        }
    }
}
