//! Relationship commands.
//!
//! These are the list/dialog path into the relationship store; they produce
//! the same stored edges as drawing a connection on the canvas.

use crate::cli::{CandidatesArgs, LinkArgs, TaskArgs, UnlinkArgs};
use crate::commands::{resolve_project, resolve_task};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use aura_board::{BoardService, RelationshipPicker};
use aura_domain::traits::ProjectRepository;
use aura_domain::{AnchorSide, Relationship};
use std::fmt::Display;

/// Execute the link command.
pub fn execute_link<R>(args: LinkArgs, service: &mut BoardService<R>, formatter: &Formatter) -> Result<String>
where
    R: ProjectRepository,
    R::Error: Display,
{
    let project = resolve_project(service, &args.project)?;
    let from = resolve_task(&project, &args.from)?;
    let to = resolve_task(&project, &args.to)?;

    let change = match (args.from_handle, args.to_handle) {
        (None, None) => {
            let mut picker = RelationshipPicker::new(from);
            picker.open();
            picker.select_type(args.kind);
            service
                .commit_picker(&project.id, &mut picker, &to)?
                .ok_or_else(|| CliError::InvalidInput("No relationship type selected".to_string()))?
        }
        (from_handle, to_handle) => {
            let edge = Relationship::new(args.kind, to).with_handles(
                from_handle.unwrap_or(AnchorSide::DEFAULT_SOURCE),
                to_handle.unwrap_or(AnchorSide::DEFAULT_TARGET),
            );
            service.link(&project.id, &from, edge)?
        }
    };
    Ok(formatter.edge_change("Linked", args.kind, &change))
}

/// Execute the unlink command.
pub fn execute_unlink<R>(args: UnlinkArgs, service: &mut BoardService<R>, formatter: &Formatter) -> Result<String>
where
    R: ProjectRepository,
    R::Error: Display,
{
    let project = resolve_project(service, &args.project)?;
    let from = resolve_task(&project, &args.from)?;
    // The other end may already be gone; match dangling edges by raw ID
    let to = resolve_task(&project, &args.to).unwrap_or_else(|_| args.to.as_str().into());

    let change = service.unlink(&project.id, &from, &Relationship::new(args.kind, to))?;
    Ok(formatter.edge_change("Unlinked", args.kind, &change))
}

/// Execute the relations command.
pub fn execute_relations<R>(args: TaskArgs, service: &BoardService<R>, formatter: &Formatter) -> Result<String>
where
    R: ProjectRepository,
    R::Error: Display,
{
    let project = resolve_project(service, &args.project)?;
    let task = resolve_task(&project, &args.task)?;
    formatter.format_relations(&service.relationships_of(&project.id, &task)?)
}

/// Execute the candidates command.
pub fn execute_candidates<R>(args: CandidatesArgs, service: &BoardService<R>, formatter: &Formatter) -> Result<String>
where
    R: ProjectRepository,
    R::Error: Display,
{
    let project = resolve_project(service, &args.project)?;
    let task = resolve_task(&project, &args.task)?;

    let mut picker = RelationshipPicker::new(task);
    if let Some(kind) = args.kind {
        picker.select_type(kind);
    }
    if let Some(search) = args.search {
        picker.set_query(search);
    }
    formatter.format_candidates(&picker.candidates(&project))
}

/// Execute the types command.
pub fn execute_types(formatter: &Formatter) -> Result<String> {
    formatter.format_types()
}
