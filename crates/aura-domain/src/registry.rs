//! Relationship type registry
//!
//! Static catalogue of every [`RelationshipType`]: its inverse, label and the
//! presentation hints the views use. Lookups are total over the enum. Typed
//! ids go through [`try_lookup`] (see `RelationshipType::parse`) and persisted
//! ones through deserialization, so an unknown id never becomes a
//! [`RelationshipType`].

use crate::relationship::RelationshipType;

/// Icon drawn next to a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    /// Arrow pointing right
    ArrowRight,
    /// Arrow pointing left
    ArrowLeft,
    /// Chain link
    Link,
    /// Two overlapping sheets
    Copy,
    /// Branch splitting off
    GitBranch,
    /// Branch merging in
    GitMerge,
}

impl IconKind {
    /// Icon name
    pub fn as_str(&self) -> &'static str {
        match self {
            IconKind::ArrowRight => "arrow-right",
            IconKind::ArrowLeft => "arrow-left",
            IconKind::Link => "link",
            IconKind::Copy => "copy",
            IconKind::GitBranch => "git-branch",
            IconKind::GitMerge => "git-merge",
        }
    }
}

/// Color family used for badges and pickers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCategory {
    /// Red
    Red,
    /// Orange
    Orange,
    /// Blue
    Blue,
    /// Purple
    Purple,
    /// Green
    Green,
    /// Teal
    Teal,
}

impl ColorCategory {
    /// Palette name
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorCategory::Red => "red",
            ColorCategory::Orange => "orange",
            ColorCategory::Blue => "blue",
            ColorCategory::Purple => "purple",
            ColorCategory::Green => "green",
            ColorCategory::Teal => "teal",
        }
    }
}

/// Everything the views need to know about one relationship type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    /// The type described
    pub kind: RelationshipType,
    /// Persisted id
    pub id: &'static str,
    /// Short label
    pub label: &'static str,
    /// One-line description for pickers
    pub description: &'static str,
    /// Type recorded on the opposite endpoint
    pub inverse: RelationshipType,
    /// Icon
    pub icon: IconKind,
    /// Color family
    pub color: ColorCategory,
    /// Canvas edge stroke color
    pub stroke: &'static str,
}

/// Stroke width of every canvas edge
pub const STROKE_WIDTH: u32 = 2;

static CATALOGUE: [TypeInfo; 6] = [
    TypeInfo {
        kind: RelationshipType::Blocks,
        id: "blocks",
        label: "Blocks",
        description: "This task blocks another task",
        inverse: RelationshipType::BlockedBy,
        icon: IconKind::ArrowRight,
        color: ColorCategory::Red,
        stroke: "#ef4444",
    },
    TypeInfo {
        kind: RelationshipType::BlockedBy,
        id: "blocked-by",
        label: "Blocked By",
        description: "This task is blocked by another task",
        inverse: RelationshipType::Blocks,
        icon: IconKind::ArrowLeft,
        color: ColorCategory::Orange,
        stroke: "#f97316",
    },
    TypeInfo {
        kind: RelationshipType::RelatesTo,
        id: "relates-to",
        label: "Relates To",
        description: "This task is related to another task",
        inverse: RelationshipType::RelatesTo,
        icon: IconKind::Link,
        color: ColorCategory::Blue,
        stroke: "#3b82f6",
    },
    TypeInfo {
        kind: RelationshipType::Duplicates,
        id: "duplicates",
        label: "Duplicates",
        description: "This task duplicates another task",
        inverse: RelationshipType::Duplicates,
        icon: IconKind::Copy,
        color: ColorCategory::Purple,
        stroke: "#a855f7",
    },
    TypeInfo {
        kind: RelationshipType::ParentOf,
        id: "parent-of",
        label: "Parent Of",
        description: "This task is a parent of another task",
        inverse: RelationshipType::ChildOf,
        icon: IconKind::GitBranch,
        color: ColorCategory::Green,
        stroke: "#22c55e",
    },
    TypeInfo {
        kind: RelationshipType::ChildOf,
        id: "child-of",
        label: "Child Of",
        description: "This task is a child of another task",
        inverse: RelationshipType::ParentOf,
        icon: IconKind::GitMerge,
        color: ColorCategory::Teal,
        stroke: "#14b8a6",
    },
];

/// The full catalogue, in picker order
pub fn catalogue() -> &'static [TypeInfo] {
    &CATALOGUE
}

/// Metadata for a relationship type
pub fn info(kind: RelationshipType) -> &'static TypeInfo {
    let index = match kind {
        RelationshipType::Blocks => 0,
        RelationshipType::BlockedBy => 1,
        RelationshipType::RelatesTo => 2,
        RelationshipType::Duplicates => 3,
        RelationshipType::ParentOf => 4,
        RelationshipType::ChildOf => 5,
    };
    &CATALOGUE[index]
}

/// Inverse of a relationship type
pub fn inverse(kind: RelationshipType) -> RelationshipType {
    info(kind).inverse
}

/// Canvas stroke color for a relationship type
pub fn stroke(kind: RelationshipType) -> &'static str {
    info(kind).stroke
}

/// Metadata for a raw persisted id, if it is in the catalogue
pub fn try_lookup(id: &str) -> Option<&'static TypeInfo> {
    CATALOGUE.iter().find(|entry| entry.id == id)
}
