//! Command implementations.
//!
//! Each command returns the text to print. Projects and tasks can be named by
//! ID or, when unambiguous, by title (case-insensitive).

pub mod graph;
pub mod init;
pub mod projects;
pub mod relations;
pub mod tasks;

pub use self::graph::{execute_check, execute_graph};
pub use self::init::execute_init_config;
pub use self::projects::{execute_add_project, execute_projects};
pub use self::relations::{execute_candidates, execute_link, execute_relations, execute_types, execute_unlink};
pub use self::tasks::{execute_add_task, execute_delete_task, execute_move, execute_tasks};

use crate::error::{CliError, Result};
use aura_board::{BoardError, BoardService};
use aura_domain::traits::ProjectRepository;
use aura_domain::{Project, ProjectId, TaskId};
use std::fmt::Display;

/// Find a project by ID, then by title.
pub fn resolve_project<R>(service: &BoardService<R>, key: &str) -> Result<Project>
where
    R: ProjectRepository,
    R::Error: Display,
{
    let projects = service.projects()?;
    if let Some(project) = projects.iter().find(|p| p.id.as_str() == key) {
        return Ok(project.clone());
    }

    let mut by_title = projects.into_iter().filter(|p| p.title.eq_ignore_ascii_case(key));
    match (by_title.next(), by_title.next()) {
        (Some(project), None) => Ok(project),
        (Some(_), Some(_)) => Err(CliError::InvalidInput(format!(
            "More than one project is titled '{}'; use its ID",
            key
        ))),
        (None, _) => Err(BoardError::ProjectNotFound(ProjectId::new(key)).into()),
    }
}

/// Find a task by ID, then by title.
pub fn resolve_task(project: &Project, key: &str) -> Result<TaskId> {
    let id = TaskId::new(key);
    if project.contains_task(&id) {
        return Ok(id);
    }

    let mut by_title = project.tasks().filter(|t| t.title.eq_ignore_ascii_case(key));
    match (by_title.next(), by_title.next()) {
        (Some(task), None) => Ok(task.id.clone()),
        (Some(_), Some(_)) => Err(CliError::InvalidInput(format!(
            "More than one task is titled '{}'; use its ID",
            key
        ))),
        (None, _) => Err(BoardError::TaskNotFound(id).into()),
    }
}
