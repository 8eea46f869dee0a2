//! Project commands.

use crate::cli::AddProjectArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use aura_board::BoardService;
use aura_domain::traits::ProjectRepository;
use aura_domain::{Column, Project};
use aura_store::JsonFileStore;
use std::fmt::Display;

/// Execute the projects command.
pub fn execute_projects<R>(service: &BoardService<R>, formatter: &Formatter) -> Result<String>
where
    R: ProjectRepository,
    R::Error: Display,
{
    formatter.format_projects(&service.projects()?)
}

/// Execute the add-project command.
pub fn execute_add_project(
    args: AddProjectArgs,
    service: &mut BoardService<JsonFileStore>,
    formatter: &Formatter,
) -> Result<String> {
    let id = match args.id {
        Some(id) => id,
        None => slug(&args.title),
    };
    if id.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "Cannot derive an ID from '{}'; pass --id",
            args.title
        )));
    }

    let mut project = Project::new(id.clone(), args.title.clone());
    for (index, title) in args.columns.iter().enumerate() {
        let column_id = match slug(title) {
            s if s.is_empty() => format!("column-{}", index + 1),
            s => s,
        };
        project = project.with_column(Column::new(column_id, title.clone()));
    }

    service.repository_mut().insert_project(project)?;
    tracing::info!("Created project {}", id);
    Ok(formatter.success(&format!("Project created: {} ({})", args.title, id)))
}

/// `"In Progress!"` -> `"in-progress"`
pub(crate) fn slug(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
