//! Task commands.

use crate::cli::{AddTaskArgs, MoveArgs, ProjectArgs, TaskArgs};
use crate::commands::{resolve_project, resolve_task};
use crate::error::Result;
use crate::output::Formatter;
use aura_board::BoardService;
use aura_domain::traits::ProjectRepository;
use aura_domain::{CanvasPosition, Task, TaskId};
use std::fmt::Display;

/// Execute the tasks command.
pub fn execute_tasks<R>(args: ProjectArgs, service: &BoardService<R>, formatter: &Formatter) -> Result<String>
where
    R: ProjectRepository,
    R::Error: Display,
{
    let project = resolve_project(service, &args.project)?;
    formatter.format_tasks(&project)
}

/// Execute the add-task command.
pub fn execute_add_task<R>(args: AddTaskArgs, service: &mut BoardService<R>, formatter: &Formatter) -> Result<String>
where
    R: ProjectRepository,
    R::Error: Display,
{
    let project = resolve_project(service, &args.project)?;
    let id = match args.id {
        Some(id) => TaskId::new(id),
        None => TaskId::generate(),
    };
    let task = Task::new(id, args.title).with_hierarchy(args.hierarchy);

    let added = service.add_task(&project.id, args.column.as_deref(), task)?;
    formatter.format_task(&added)
}

/// Execute the delete-task command.
pub fn execute_delete_task<R>(args: TaskArgs, service: &mut BoardService<R>, formatter: &Formatter) -> Result<String>
where
    R: ProjectRepository,
    R::Error: Display,
{
    let project = resolve_project(service, &args.project)?;
    let task = resolve_task(&project, &args.task)?;
    let edges = project
        .tasks()
        .map(|t| t.edges_to(&task).count())
        .sum::<usize>();

    match service.delete_task(&project.id, &task)? {
        Some(removed) => Ok(formatter.success(&format!(
            "Deleted {} ({}), removed {} relationship(s) pointing at it",
            removed.title, removed.id, edges
        ))),
        None => Ok(formatter.warning(&format!("Task {} was already gone", task))),
    }
}

/// Execute the move command.
pub fn execute_move<R>(args: MoveArgs, service: &mut BoardService<R>, formatter: &Formatter) -> Result<String>
where
    R: ProjectRepository,
    R::Error: Display,
{
    let project = resolve_project(service, &args.project)?;
    let task = resolve_task(&project, &args.task)?;
    let position = CanvasPosition::new(args.x, args.y);

    service.move_task(&project.id, &task, position)?;
    Ok(formatter.success(&format!("Moved {} to ({}, {})", task, position.x, position.y)))
}
