//! CLI command definitions and argument parsing.

use aura_domain::{AnchorSide, HierarchyType, RelationshipType};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Aura - Task relationships and the board canvas from the command line.
#[derive(Debug, Parser)]
#[command(name = "aura")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Board file (overrides the configured path)
    #[arg(short, long, global = true, env = "AURA_BOARD")]
    pub board: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List projects
    Projects,

    /// Create a project
    AddProject(AddProjectArgs),

    /// List the tasks of a project
    Tasks(ProjectArgs),

    /// Create a task
    AddTask(AddTaskArgs),

    /// Delete a task and every relationship pointing at it
    DeleteTask(TaskArgs),

    /// Set the canvas position of a task
    Move(MoveArgs),

    /// Add a relationship (and its inverse)
    Link(LinkArgs),

    /// Remove a relationship (and its inverse)
    Unlink(UnlinkArgs),

    /// Show the relationships of a task
    Relations(TaskArgs),

    /// List tasks that can be related to a task
    Candidates(CandidatesArgs),

    /// Print the canvas graph of a project
    Graph(ProjectArgs),

    /// Report relationship inconsistencies
    Check(ProjectArgs),

    /// List relationship types
    Types,

    /// Open an interactive canvas session
    Canvas(ProjectArgs),

    /// Write the default configuration file
    InitConfig(InitConfigArgs),
}

/// A project, by ID or title.
#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Project ID or title
    pub project: String,
}

/// A task within a project.
#[derive(Debug, Args)]
pub struct TaskArgs {
    /// Project ID or title
    pub project: String,

    /// Task ID or title
    pub task: String,
}

/// Arguments for the add-project command.
#[derive(Debug, Args)]
pub struct AddProjectArgs {
    /// Project title
    pub title: String,

    /// Project ID (generated from the title when omitted)
    #[arg(long)]
    pub id: Option<String>,

    /// Column titles, in order
    #[arg(long = "column", default_values_t = ["To Do".to_string(), "In Progress".to_string(), "Done".to_string()])]
    pub columns: Vec<String>,
}

/// Arguments for the add-task command.
#[derive(Debug, Args)]
pub struct AddTaskArgs {
    /// Project ID or title
    pub project: String,

    /// Task title
    pub title: String,

    /// Column ID or title (defaults to the first column)
    #[arg(long)]
    pub column: Option<String>,

    /// Epic, story or task
    #[arg(long, default_value = "task")]
    pub hierarchy: HierarchyType,

    /// Task ID (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,
}

/// Arguments for the move command.
#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Project ID or title
    pub project: String,

    /// Task ID or title
    pub task: String,

    /// Canvas X
    #[arg(allow_negative_numbers = true)]
    pub x: f64,

    /// Canvas Y
    #[arg(allow_negative_numbers = true)]
    pub y: f64,
}

/// Arguments for the link command.
#[derive(Debug, Args)]
pub struct LinkArgs {
    /// Project ID or title
    pub project: String,

    /// Task owning the relationship
    pub from: String,

    /// Relationship type (blocks, blocked-by, relates-to, duplicates, parent-of, child-of)
    pub kind: RelationshipType,

    /// The other task
    pub to: String,

    /// Anchor on the first task's node [default: right]
    #[arg(long)]
    pub from_handle: Option<AnchorSide>,

    /// Anchor on the other task's node [default: left]
    #[arg(long)]
    pub to_handle: Option<AnchorSide>,
}

/// Arguments for the unlink command.
#[derive(Debug, Args)]
pub struct UnlinkArgs {
    /// Project ID or title
    pub project: String,

    /// Task owning the relationship
    pub from: String,

    /// Relationship type
    pub kind: RelationshipType,

    /// The other task
    pub to: String,
}

/// Arguments for the candidates command.
#[derive(Debug, Args)]
pub struct CandidatesArgs {
    /// Project ID or title
    pub project: String,

    /// Task ID or title
    pub task: String,

    /// Hide tasks already related by this type
    #[arg(short = 't', long = "type")]
    pub kind: Option<RelationshipType>,

    /// Title filter (case-insensitive substring)
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the init-config command.
#[derive(Debug, Args)]
pub struct InitConfigArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_link_command() {
        let cli = Cli::try_parse_from(["aura", "link", "Launch", "design", "blocked_by", "impl", "--to-handle", "top"]).unwrap();
        match cli.command {
            Command::Link(args) => {
                assert_eq!(args.kind, RelationshipType::BlockedBy);
                assert_eq!(args.from_handle, None);
                assert_eq!(args.to_handle, Some(AnchorSide::Top));
            }
            other => panic!("Expected Link command, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(Cli::try_parse_from(["aura", "link", "p1", "a", "follows", "b"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["aura", "graph", "p1", "--format", "json", "-v", "--board", "/tmp/b.json"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.board, Some(PathBuf::from("/tmp/b.json")));
    }

    #[test]
    fn test_add_project_default_columns() {
        let cli = Cli::try_parse_from(["aura", "add-project", "Launch"]).unwrap();
        match cli.command {
            Command::AddProject(args) => assert_eq!(args.columns, vec!["To Do", "In Progress", "Done"]),
            other => panic!("Expected AddProject command, got {:?}", other),
        }
    }

    #[test]
    fn test_move_negative_coordinates() {
        let cli = Cli::try_parse_from(["aura", "move", "p1", "a", "-40", "12.5"]).unwrap();
        match cli.command {
            Command::Move(args) => {
                assert_eq!(args.x, -40.0);
                assert_eq!(args.y, 12.5);
            }
            other => panic!("Expected Move command, got {:?}", other),
        }
    }
}
