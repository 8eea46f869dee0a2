//! Interactive canvas session.
//!
//! Drives a [`CanvasController`] from typed commands: `drag` and `drop` stand
//! in for pointer gestures on node anchors, `pick` answers the type picker.

use crate::commands::resolve_task;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use aura_board::{
    BoardError, CanvasController, ConnectionState, DismissReason, DropTarget, Outcome, TypeChoice, TypePrompt,
};
use aura_domain::traits::ProjectRepository;
use aura_domain::{AnchorSide, CanvasPosition, Project, ProjectId, RelationshipType, TaskId};
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::fmt::Display;
use std::path::PathBuf;

/// Run the canvas session for `project` until `exit` or end of input.
pub fn run_canvas<R>(
    controller: &mut CanvasController<R>,
    project: ProjectId,
    formatter: &Formatter,
    history_size: usize,
) -> Result<()>
where
    R: ProjectRepository,
    R::Error: Display,
{
    let graph = controller.select_project(project)?;
    let title = controller.project()?.title;
    println!(
        "{}",
        formatter.info(&format!(
            "Canvas for {} - {} task(s), {} edge(s). Type 'help' for commands, 'exit' to quit",
            title,
            graph.nodes.len(),
            graph.edges.len()
        ))
    );
    println!();

    let editor_config = EditorConfig::builder().max_history_size(history_size)?.build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    let history_path = get_history_path().ok();
    if let Some(path) = &history_path {
        let _ = editor.load_history(path);
    }

    let mut prompt: Option<TypePrompt> = None;

    loop {
        let line_prompt = match controller.connection() {
            ConnectionState::Idle => format!("aura:{}> ", title),
            ConnectionState::Pending { .. } => format!("aura:{} (dragging)> ", title),
            ConnectionState::AwaitingType(_) => format!("aura:{} (pick type)> ", title),
        };

        match editor.readline(&line_prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_session_command(line) {
                    Ok(SessionCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(cmd) => match execute_session_command(cmd, controller, &mut prompt, formatter) {
                        Ok(output) if output.is_empty() => {}
                        Ok(output) => println!("{}", output),
                        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                    },
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                if controller.connection().is_idle() {
                    println!("{}", formatter.info("Use 'exit' to quit"));
                } else {
                    let outcome = controller.dismiss(DismissReason::Escape);
                    prompt = None;
                    println!("{}", describe_outcome(&outcome, formatter));
                }
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    if let Outcome::Cancelled(reason) = controller.unmount() {
        tracing::debug!("Canvas closed with a gesture in progress: {}", reason);
    }

    if let Some(path) = &history_path {
        editor.save_history(path).ok();
    }

    Ok(())
}

/// A parsed canvas session command.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Start a connection drag from a task anchor
    Drag(Anchor),
    /// Release the drag over a task anchor, or over empty canvas
    Drop(Option<Anchor>),
    /// Answer the type picker
    Pick(PickArg),
    /// Close the type picker, or abandon a drag
    Dismiss(DismissReason),
    /// Move a node
    Move {
        /// Task ID or title
        task: String,
        /// New position
        position: CanvasPosition,
    },
    /// Delete a task
    Delete(String),
    /// Print the canvas graph
    Graph,
    /// Show the connection state
    Status,
    /// Show help
    Help,
    /// Leave the session
    Exit,
}

/// A task anchor as typed: `<task words...> [side]` or a `<task>-<side>` handle id.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    /// Task ID, title or handle id
    pub task: String,
    /// Side given as a separate word
    pub side: Option<AnchorSide>,
}

impl Anchor {
    /// Anchor with an explicit side
    pub fn new(task: impl Into<String>, side: AnchorSide) -> Self {
        Self {
            task: task.into(),
            side: Some(side),
        }
    }

    /// Anchor without a side word
    pub fn bare(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            side: None,
        }
    }
}

/// Answer given to the type picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickArg {
    /// A type by name
    Kind(RelationshipType),
    /// A 1-based menu position
    Number(usize),
}

/// Parse a session command line.
pub fn parse_session_command(line: &str) -> Result<SessionCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match parts[0] {
        "exit" | "quit" | "q" => Ok(SessionCommand::Exit),
        "help" | "?" => Ok(SessionCommand::Help),
        "graph" => Ok(SessionCommand::Graph),
        "status" => Ok(SessionCommand::Status),
        "cancel" => Ok(SessionCommand::Dismiss(DismissReason::Cancel)),
        "escape" | "esc" => Ok(SessionCommand::Dismiss(DismissReason::Escape)),
        "backdrop" => Ok(SessionCommand::Dismiss(DismissReason::Backdrop)),
        "drag" => parse_drag_command(&parts[1..]),
        "drop" => parse_drop_command(&parts[1..]),
        "pick" => parse_pick_command(&parts[1..]),
        "move" => parse_move_command(&parts[1..]),
        "delete" => {
            if parts.len() < 2 {
                return Err(CliError::InvalidInput("Usage: delete <task>".to_string()));
            }
            Ok(SessionCommand::Delete(parts[1..].join(" ")))
        }
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

/// Execute a session command against the canvas.
///
/// `prompt` holds the type picker while one is open.
pub fn execute_session_command<R>(
    cmd: SessionCommand,
    controller: &mut CanvasController<R>,
    prompt: &mut Option<TypePrompt>,
    formatter: &Formatter,
) -> Result<String>
where
    R: ProjectRepository,
    R::Error: Display,
{
    let output = match cmd {
        SessionCommand::Drag(anchor) => {
            let (task, side) = resolve_anchor(controller, &anchor, AnchorSide::DEFAULT_SOURCE)?;
            let outcome = controller.begin_connection(task.clone(), side)?;
            match outcome {
                Outcome::Pending { preempted } => {
                    let mut out = String::new();
                    if preempted {
                        out.push_str(&formatter.warning("Previous connection discarded"));
                        out.push('\n');
                    }
                    out.push_str(&formatter.info(&format!(
                        "Dragging from {} ({}); drop on a task or 'drop' on empty canvas",
                        task, side
                    )));
                    out
                }
                other => describe_outcome(&other, formatter),
            }
        }
        SessionCommand::Drop(anchor) => {
            let target = match anchor {
                Some(anchor) => {
                    let (task, side) = resolve_anchor(controller, &anchor, AnchorSide::DEFAULT_TARGET)?;
                    Some(DropTarget::new(task, side))
                }
                None => None,
            };
            let outcome = controller.release_connection(target)?;
            if let Outcome::AwaitingType(next) = &outcome {
                *prompt = Some(next.clone());
            }
            describe_outcome(&outcome, formatter)
        }
        SessionCommand::Pick(arg) => {
            let kind = match arg {
                PickArg::Kind(kind) => kind,
                PickArg::Number(number) => {
                    let open = prompt
                        .as_ref()
                        .ok_or_else(|| CliError::InvalidInput("No type picker is open".to_string()))?;
                    open.option(number)
                        .map(|info| info.kind)
                        .ok_or_else(|| CliError::InvalidInput(format!("No option {}", number)))?
                }
            };
            match controller.answer(TypeChoice::Selected(kind))? {
                (_, Some(change)) => formatter.edge_change("Linked", kind, &change),
                (Outcome::Ignored, None) => formatter.warning("No connection is waiting for a type"),
                (outcome, None) => describe_outcome(&outcome, formatter),
            }
        }
        SessionCommand::Dismiss(reason) => {
            let (outcome, _) = controller.answer(TypeChoice::Dismissed(reason))?;
            describe_outcome(&outcome, formatter)
        }
        SessionCommand::Move { task, position } => {
            let task = resolve_task(&controller.project()?, &task)?;
            let stored = controller.move_node(&task, position)?;
            formatter.success(&format!("Moved {} to {}, {}", task, stored.x, stored.y))
        }
        SessionCommand::Delete(task) => {
            let task = resolve_task(&controller.project()?, &task)?;
            match controller.delete_task(&task)? {
                Some(removed) => formatter.success(&format!("Deleted {} ({})", removed.title, removed.id)),
                None => formatter.warning(&format!("Task {} was already gone", task)),
            }
        }
        SessionCommand::Graph => formatter.format_graph(&controller.graph()?)?,
        SessionCommand::Status => describe_state(controller.connection(), formatter),
        SessionCommand::Help => help_text(formatter),
        SessionCommand::Exit => String::new(),
    };

    if !matches!(controller.connection(), ConnectionState::AwaitingType(_)) {
        *prompt = None;
    }

    Ok(output)
}

/// Resolve the task and side of a gesture anchor.
///
/// A bare token names a task when one matches it; otherwise it is read as a
/// `<task>-<side>` handle id. Unknown tasks pass through so the connection
/// cancels instead of staying open.
fn resolve_anchor<R>(controller: &CanvasController<R>, anchor: &Anchor, default: AnchorSide) -> Result<(TaskId, AnchorSide)>
where
    R: ProjectRepository,
    R::Error: Display,
{
    let project = controller.project()?;
    if let Some(side) = anchor.side {
        return Ok((lookup_task(&project, &anchor.task)?, side));
    }

    match resolve_task(&project, &anchor.task) {
        Ok(task) => Ok((task, default)),
        Err(CliError::Board(BoardError::TaskNotFound(_))) => match DropTarget::from_handle_id(&anchor.task) {
            Some(target) => Ok((lookup_task(&project, target.task_id.as_str())?, target.handle)),
            None => Ok((TaskId::new(anchor.task.as_str()), default)),
        },
        Err(e) => Err(e),
    }
}

fn lookup_task(project: &Project, key: &str) -> Result<TaskId> {
    match resolve_task(project, key) {
        Err(CliError::Board(BoardError::TaskNotFound(id))) => Ok(id),
        other => other,
    }
}

fn describe_outcome(outcome: &Outcome, formatter: &Formatter) -> String {
    match outcome {
        Outcome::Pending { .. } => formatter.info("Dragging"),
        Outcome::AwaitingType(prompt) => formatter.type_prompt(prompt),
        Outcome::Commit(request) => formatter.info(&format!(
            "Connecting {} {} {}",
            request.owner, request.edge.kind, request.edge.task_id
        )),
        Outcome::Cancelled(reason) => formatter.warning(&format!("Connection cancelled: {}", reason)),
        Outcome::Ignored => formatter.warning("No connection in progress"),
    }
}

fn describe_state(state: &ConnectionState, formatter: &Formatter) -> String {
    match state {
        ConnectionState::Idle => formatter.info("No connection in progress"),
        ConnectionState::Pending {
            source_task_id,
            source_handle,
        } => formatter.info(&format!("Dragging from {} ({})", source_task_id, source_handle)),
        ConnectionState::AwaitingType(pending) => formatter.info(&format!(
            "Waiting for a type: {} ({}) -> {} ({})",
            pending.source_task_id, pending.source_handle, pending.target_task_id, pending.target_handle
        )),
    }
}

/// Split `<task words...> [side]`; a single word is kept whole.
fn parse_anchor(args: &[&str]) -> Option<Anchor> {
    match args {
        [] => None,
        [single] => Some(Anchor::bare(*single)),
        [task @ .., last] => match AnchorSide::parse(last) {
            Some(side) => Some(Anchor::new(task.join(" "), side)),
            None => Some(Anchor::bare(args.join(" "))),
        },
    }
}

fn parse_drag_command(args: &[&str]) -> Result<SessionCommand> {
    let anchor = parse_anchor(args)
        .ok_or_else(|| CliError::InvalidInput("Usage: drag <task> [top|right|bottom|left]".to_string()))?;
    Ok(SessionCommand::Drag(anchor))
}

fn parse_drop_command(args: &[&str]) -> Result<SessionCommand> {
    Ok(SessionCommand::Drop(parse_anchor(args)))
}

fn parse_pick_command(args: &[&str]) -> Result<SessionCommand> {
    let usage = || CliError::InvalidInput("Usage: pick <number|type>".to_string());
    let arg = args.first().ok_or_else(usage)?;

    if let Ok(number) = arg.parse::<usize>() {
        return Ok(SessionCommand::Pick(PickArg::Number(number)));
    }
    let kind = RelationshipType::parse(arg)
        .ok_or_else(|| CliError::InvalidInput(format!("Unknown relationship type: {}", arg)))?;
    Ok(SessionCommand::Pick(PickArg::Kind(kind)))
}

fn parse_move_command(args: &[&str]) -> Result<SessionCommand> {
    let usage = || CliError::InvalidInput("Usage: move <task> <x> <y>".to_string());
    if args.len() < 3 {
        return Err(usage());
    }

    let (task, coords) = args.split_at(args.len() - 2);
    let x: f64 = coords[0].parse().map_err(|_| usage())?;
    let y: f64 = coords[1].parse().map_err(|_| usage())?;

    Ok(SessionCommand::Move {
        task: task.join(" "),
        position: CanvasPosition::new(x, y),
    })
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn help_text(formatter: &Formatter) -> String {
    let mut out = formatter.info("Available commands:");
    out.push_str(
        "

  drag <task> [side]             - Start a connection from a task anchor
    side: top|right|bottom|left (default: right)
  drop [<task> [side]]           - Release over a task anchor (default: left),
                                   or over empty canvas when no task is given
  pick <number|type>             - Choose the relationship type
  cancel | escape | backdrop     - Close the type picker
  move <task> <x> <y>            - Move a node
  delete <task>                  - Delete a task and its relationships
  graph                          - Show nodes and edges
  status                         - Show the connection in progress
  help, ?                        - Show this help
  exit, quit, q                  - Leave the canvas
",
    );
    out
}
