//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use aura_board::{CanvasGraph, RelationshipRow, TypePrompt};
use aura_domain::registry::{self, TypeInfo};
use aura_domain::{CanvasPosition, EdgeChange, Inconsistency, Project, RelationshipType, Task};
use colored::*;
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the project list.
    pub fn format_projects(&self, projects: &[Project]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<_> = projects
                    .iter()
                    .map(|p| {
                        json!({
                            "id": p.id,
                            "title": p.title,
                            "columns": p.columns.iter().map(|c| c.title.as_str()).collect::<Vec<_>>(),
                            "tasks": p.task_count(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Quiet => Ok(join_lines(projects.iter().map(|p| p.id.to_string()))),
            OutputFormat::Table => {
                if projects.is_empty() {
                    return Ok(self.warning("No projects found."));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Title", "Columns", "Tasks"]);
                for project in projects {
                    let columns: Vec<&str> = project.columns.iter().map(|c| c.title.as_str()).collect();
                    builder.push_record([
                        project.id.to_string(),
                        project.title.clone(),
                        columns.join(", "),
                        project.task_count().to_string(),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format the tasks of a project, column by column.
    pub fn format_tasks(&self, project: &Project) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&project.columns)?),
            OutputFormat::Quiet => Ok(join_lines(project.tasks().map(|t| t.id.to_string()))),
            OutputFormat::Table => {
                if project.task_count() == 0 {
                    return Ok(self.warning("No tasks found."));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Title", "Type", "Column", "Relations", "Position"]);
                for column in &project.columns {
                    for task in &column.tasks {
                        builder.push_record([
                            task.id.to_string(),
                            task.title.clone(),
                            task.hierarchy_type.label().to_string(),
                            column.title.clone(),
                            task.relationships.len().to_string(),
                            task.canvas_position.map(format_position).unwrap_or_else(|| "-".to_string()),
                        ]);
                    }
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a single task.
    pub fn format_task(&self, task: &Task) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(task)?),
            OutputFormat::Quiet => Ok(task.id.to_string()),
            OutputFormat::Table => Ok(self.success(&format!("Task created: {} ({})", task.title, task.id))),
        }
    }

    /// Format a task's relationship listing.
    pub fn format_relations(&self, rows: &[RelationshipRow]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
            OutputFormat::Quiet => Ok(join_lines(rows.iter().map(|r| format!("{} {}", r.edge.kind, r.edge.task_id)))),
            OutputFormat::Table => {
                if rows.is_empty() {
                    return Ok(self.warning("No relationships."));
                }
                let mut builder = Builder::default();
                builder.push_record(["Type", "Task", "Title", "Anchors"]);
                for row in rows {
                    let title = match &row.other_title {
                        Some(title) => title.clone(),
                        None => self.colorize("(missing)", "red"),
                    };
                    let anchors = match (row.edge.source_handle, row.edge.target_handle) {
                        (Some(from), Some(to)) => format!("{} -> {}", from, to),
                        _ => "-".to_string(),
                    };
                    builder.push_record([self.type_label(row.info), row.edge.task_id.to_string(), title, anchors]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format relationship candidates.
    pub fn format_candidates(&self, tasks: &[&Task]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<_> = tasks.iter().map(|t| json!({ "id": t.id, "title": t.title })).collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Quiet => Ok(join_lines(tasks.iter().map(|t| t.id.to_string()))),
            OutputFormat::Table => {
                if tasks.is_empty() {
                    return Ok(self.warning("No matching tasks."));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Title", "Type"]);
                for task in tasks {
                    builder.push_record([task.id.to_string(), task.title.clone(), task.hierarchy_type.label().to_string()]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a canvas graph.
    pub fn format_graph(&self, graph: &CanvasGraph) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(graph)?),
            OutputFormat::Quiet => Ok(join_lines(graph.edges.iter().map(|e| e.id.clone()))),
            OutputFormat::Table => {
                let mut nodes = Builder::default();
                nodes.push_record(["Node", "Title", "Column", "Position"]);
                for node in &graph.nodes {
                    nodes.push_record([
                        node.id.to_string(),
                        node.data.title.clone(),
                        node.data.column_title.clone(),
                        format_position(node.position),
                    ]);
                }

                let mut edges = Builder::default();
                edges.push_record(["Edge", "Type", "From", "To", "Anchors"]);
                for edge in &graph.edges {
                    edges.push_record([
                        edge.id.clone(),
                        self.paint(edge.relationship_type.as_str(), edge.style_token),
                        format!("{} ({})", edge.source, format_position(edge.start)),
                        format!("{} ({})", edge.target, format_position(edge.end)),
                        format!("{} -> {}", edge.source_handle, edge.target_handle),
                    ]);
                }

                let mut out = render(nodes);
                out.push('\n');
                if graph.edges.is_empty() {
                    out.push_str(&self.info("No edges."));
                } else {
                    out.push_str(&render(edges));
                }
                if graph.skipped_edges > 0 {
                    out.push('\n');
                    out.push_str(&self.warning(&format!(
                        "{} edge(s) skipped: target task not in project",
                        graph.skipped_edges
                    )));
                }
                Ok(out)
            }
        }
    }

    /// Format consistency check results.
    pub fn format_issues(&self, issues: &[Inconsistency]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<_> = issues
                    .iter()
                    .map(|issue| json!({ "kind": issue_kind(issue), "description": issue.to_string() }))
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Quiet => Ok(join_lines(issues.iter().map(|issue| issue.to_string()))),
            OutputFormat::Table => {
                if issues.is_empty() {
                    return Ok(self.success("All relationships are consistent"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Problem", "Details"]);
                for issue in issues {
                    builder.push_record([issue_kind(issue).to_string(), issue.to_string()]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format the relationship type catalogue.
    pub fn format_types(&self) -> Result<String> {
        let catalogue = registry::catalogue();
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<_> = catalogue
                    .iter()
                    .map(|info| {
                        json!({
                            "id": info.id,
                            "label": info.label,
                            "description": info.description,
                            "inverse": info.inverse,
                            "icon": info.icon.as_str(),
                            "color": info.color.as_str(),
                            "stroke": info.stroke,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Quiet => Ok(join_lines(catalogue.iter().map(|info| info.id.to_string()))),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["ID", "Label", "Inverse", "Icon", "Stroke", "Description"]);
                for info in catalogue {
                    builder.push_record([
                        info.id.to_string(),
                        self.type_label(info),
                        info.inverse.to_string(),
                        info.icon.as_str().to_string(),
                        info.stroke.to_string(),
                        info.description.to_string(),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format the type picker shown once a connection has both ends.
    pub fn type_prompt(&self, prompt: &TypePrompt) -> String {
        let mut out = self.info(&format!(
            "Connect \"{}\" to \"{}\" as:",
            prompt.source_title, prompt.target_title
        ));
        for (index, info) in prompt.options.iter().enumerate() {
            out.push_str(&format!("\n  {}. {:<12} {}", index + 1, self.type_label(info), info.description));
        }
        out.push_str("\n  (pick <number|type>, or cancel)");
        out
    }

    /// Describe what a relationship operation did.
    pub fn edge_change(&self, action: &str, kind: RelationshipType, change: &EdgeChange) -> String {
        match change {
            EdgeChange::Applied => self.success(&format!("{} {} (and {})", action, kind, kind.inverse())),
            EdgeChange::Unchanged(reason) => self.warning(&format!("Nothing changed: {}", reason)),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn type_label(&self, info: &TypeInfo) -> String {
        self.paint(info.label, info.stroke)
    }

    /// Paint text with a `#rrggbb` stroke color.
    fn paint(&self, text: &str, stroke: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        match parse_hex(stroke) {
            Some((r, g, b)) => text.truecolor(r, g, b).to_string(),
            None => text.to_string(),
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn join_lines(lines: impl Iterator<Item = String>) -> String {
    lines.collect::<Vec<_>>().join("\n")
}

fn format_position(position: CanvasPosition) -> String {
    format!("{}, {}", position.x, position.y)
}

fn issue_kind(issue: &Inconsistency) -> &'static str {
    match issue {
        Inconsistency::SelfReference { .. } => "self-reference",
        Inconsistency::DanglingReference { .. } => "dangling",
        Inconsistency::MissingInverse { .. } => "missing-inverse",
        Inconsistency::DuplicateEdge { .. } => "duplicate",
    }
}

fn parse_hex(stroke: &str) -> Option<(u8, u8, u8)> {
    let hex = stroke.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
