//! Canvas graph and consistency commands.

use crate::cli::ProjectArgs;
use crate::commands::resolve_project;
use crate::error::Result;
use crate::output::Formatter;
use aura_board::{project_graph, BoardService, CanvasConfig};
use aura_domain::traits::ProjectRepository;
use std::fmt::Display;

/// Execute the graph command.
pub fn execute_graph<R>(
    args: ProjectArgs,
    service: &BoardService<R>,
    canvas: &CanvasConfig,
    formatter: &Formatter,
) -> Result<String>
where
    R: ProjectRepository,
    R::Error: Display,
{
    let project = resolve_project(service, &args.project)?;
    formatter.format_graph(&project_graph(&project, canvas))
}

/// Execute the check command.
pub fn execute_check<R>(args: ProjectArgs, service: &BoardService<R>, formatter: &Formatter) -> Result<String>
where
    R: ProjectRepository,
    R::Error: Display,
{
    let project = resolve_project(service, &args.project)?;
    let issues = service.check(&project.id)?;
    if !issues.is_empty() {
        tracing::warn!("Project {} has {} relationship problem(s)", project.id, issues.len());
    }
    formatter.format_issues(&issues)
}
