//! Canvas graph projection
//!
//! Turns one project into the node/edge lists a graph widget renders. The
//! projection is derived from scratch every time; nothing here is stored.

use crate::config::{CanvasConfig, LayoutConfig};
use aura_domain::registry;
use aura_domain::{AnchorSide, CanvasPosition, HierarchyType, Project, ProjectId, RelationshipType, TaskId, TaskSlot};
use serde::Serialize;
use std::collections::HashSet;

/// Relationship summary shown on a node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    /// Type as seen from the node's task
    pub relationship_type: RelationshipType,
    /// The other task
    pub task_id: TaskId,
    /// Type label
    pub label: &'static str,
}

/// Display data of a node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    /// Card title
    pub title: String,
    /// Epic, story or task
    pub hierarchy_type: HierarchyType,
    /// Title of the column holding the task
    pub column_title: String,
    /// Color of the column holding the task
    pub column_color: String,
    /// One badge per stored edge
    pub badges: Vec<Badge>,
}

/// One task on the canvas
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasNode {
    /// The task ID
    pub id: TaskId,
    /// Top-left corner of the node box
    pub position: CanvasPosition,
    /// What the node shows
    pub data: NodeData,
}

/// One stored edge on the canvas
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasEdge {
    /// `<source>-<type>-<target>`
    pub id: String,
    /// Task owning the edge
    pub source: TaskId,
    /// The other task
    pub target: TaskId,
    /// Anchor on the source node
    pub source_handle: AnchorSide,
    /// Anchor on the target node
    pub target_handle: AnchorSide,
    /// Stroke color
    pub style_token: &'static str,
    /// Stroke width
    pub stroke_width: u32,
    /// Type as seen from the source
    pub relationship_type: RelationshipType,
    /// Canvas coordinate of the source anchor
    pub start: CanvasPosition,
    /// Canvas coordinate of the target anchor
    pub end: CanvasPosition,
}

/// Render-ready graph of one project
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasGraph {
    /// Project the graph was derived from
    pub project_id: ProjectId,
    /// One node per task
    pub nodes: Vec<CanvasNode>,
    /// One edge per stored relationship, minus dangling ones
    pub edges: Vec<CanvasEdge>,
    /// Stored edges left out because their target is not in the project
    pub skipped_edges: usize,
}

impl CanvasGraph {
    /// Find a node by task ID
    pub fn node(&self, id: &TaskId) -> Option<&CanvasNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }
}

/// Position of a task that was never placed on the canvas
pub fn default_position(slot: TaskSlot, layout: &LayoutConfig) -> CanvasPosition {
    CanvasPosition::new(
        layout.origin_x + layout.column_spacing * slot.column as f64,
        layout.origin_y + layout.row_spacing * slot.index as f64,
    )
}

/// Canvas coordinate of `side` on a node whose box starts at `position`
pub fn anchor_point(position: CanvasPosition, side: AnchorSide, config: &CanvasConfig) -> CanvasPosition {
    let (w, h) = (config.node_width, config.node_height);
    match side {
        AnchorSide::Top => CanvasPosition::new(position.x + w / 2.0, position.y),
        AnchorSide::Right => CanvasPosition::new(position.x + w, position.y + h / 2.0),
        AnchorSide::Bottom => CanvasPosition::new(position.x + w / 2.0, position.y + h),
        AnchorSide::Left => CanvasPosition::new(position.x, position.y + h / 2.0),
    }
}

/// Derive the canvas graph of `project`
///
/// Edges whose target is not in the project are skipped and counted, never
/// repaired. With `dedupe_reciprocal_edges` set, an edge is left out when its
/// inverse was already drawn.
pub fn project_graph(project: &Project, config: &CanvasConfig) -> CanvasGraph {
    let mut nodes = Vec::with_capacity(project.task_count());
    for (column_index, column) in project.columns.iter().enumerate() {
        for (index, task) in column.tasks.iter().enumerate() {
            let slot = TaskSlot {
                column: column_index,
                index,
            };
            let badges = task
                .relationships
                .iter()
                .map(|rel| Badge {
                    relationship_type: rel.kind,
                    task_id: rel.task_id.clone(),
                    label: registry::info(rel.kind).label,
                })
                .collect();

            nodes.push(CanvasNode {
                id: task.id.clone(),
                position: task
                    .canvas_position
                    .unwrap_or_else(|| default_position(slot, &config.layout)),
                data: NodeData {
                    title: task.title.clone(),
                    hierarchy_type: task.hierarchy_type,
                    column_title: column.title.clone(),
                    column_color: column.color.clone(),
                    badges,
                },
            });
        }
    }

    let mut edges = Vec::new();
    let mut drawn: HashSet<(&TaskId, RelationshipType, &TaskId)> = HashSet::new();
    let mut skipped_edges = 0;

    for task in project.tasks() {
        let Some(source) = nodes.iter().find(|node| node.id == task.id) else {
            continue;
        };
        for rel in &task.relationships {
            let Some(target) = nodes.iter().find(|node| node.id == rel.task_id) else {
                tracing::warn!(
                    "Skipping edge {} {} {}: target not in project {}",
                    task.id,
                    rel.kind,
                    rel.task_id,
                    project.id
                );
                skipped_edges += 1;
                continue;
            };

            if config.dedupe_reciprocal_edges && drawn.contains(&(&rel.task_id, rel.kind.inverse(), &task.id)) {
                continue;
            }
            drawn.insert((&task.id, rel.kind, &rel.task_id));

            let source_handle = rel.source_handle.unwrap_or(AnchorSide::DEFAULT_SOURCE);
            let target_handle = rel.target_handle.unwrap_or(AnchorSide::DEFAULT_TARGET);
            edges.push(CanvasEdge {
                id: format!("{}-{}-{}", task.id, rel.kind, rel.task_id),
                source: task.id.clone(),
                target: rel.task_id.clone(),
                source_handle,
                target_handle,
                style_token: registry::stroke(rel.kind),
                stroke_width: registry::STROKE_WIDTH,
                relationship_type: rel.kind,
                start: anchor_point(source.position, source_handle, config),
                end: anchor_point(target.position, target_handle, config),
            });
        }
    }

    tracing::debug!(
        "Projected {}: {} nodes, {} edges, {} skipped",
        project.id,
        nodes.len(),
        edges.len(),
        skipped_edges
    );

    CanvasGraph {
        project_id: project.id.clone(),
        nodes,
        edges,
        skipped_edges,
    }
}
