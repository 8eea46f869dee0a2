//! Aura CLI - Task relationships and the board canvas from the command line.

use aura_board::{BoardService, CanvasController};
use aura_cli::commands;
use aura_cli::repl;
use aura_cli::{Cli, Command, Config, Formatter};
use aura_store::{JsonFileStore, LoadSource};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Log to stderr so command output stays clean
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("AURA_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> aura_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    // The board is only opened by commands that use it
    let board = cli.board;
    let open = || open_service(&config, board.clone(), &formatter);

    let output = match cli.command {
        Command::InitConfig(args) => commands::execute_init_config(args, cli.config.as_deref(), &formatter)?,
        Command::Types => commands::execute_types(&formatter)?,
        Command::Projects => commands::execute_projects(&open()?, &formatter)?,
        Command::AddProject(args) => commands::execute_add_project(args, &mut open()?, &formatter)?,
        Command::Tasks(args) => commands::execute_tasks(args, &open()?, &formatter)?,
        Command::AddTask(args) => commands::execute_add_task(args, &mut open()?, &formatter)?,
        Command::DeleteTask(args) => commands::execute_delete_task(args, &mut open()?, &formatter)?,
        Command::Move(args) => commands::execute_move(args, &mut open()?, &formatter)?,
        Command::Link(args) => commands::execute_link(args, &mut open()?, &formatter)?,
        Command::Unlink(args) => commands::execute_unlink(args, &mut open()?, &formatter)?,
        Command::Relations(args) => commands::execute_relations(args, &open()?, &formatter)?,
        Command::Candidates(args) => commands::execute_candidates(args, &open()?, &formatter)?,
        Command::Graph(args) => commands::execute_graph(args, &open()?, &config.canvas, &formatter)?,
        Command::Check(args) => commands::execute_check(args, &open()?, &formatter)?,
        Command::Canvas(args) => {
            let service = open()?;
            let project = commands::resolve_project(&service, &args.project)?;
            let mut controller = CanvasController::new(service.into_repository(), config.canvas.clone());
            repl::run_canvas(&mut controller, project.id, &formatter, config.settings.history_size)?;
            return Ok(());
        }
    };

    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}

fn open_service(
    config: &Config,
    board: Option<PathBuf>,
    formatter: &Formatter,
) -> aura_cli::Result<BoardService<JsonFileStore>> {
    let store = JsonFileStore::open(&config.store_config(board))?;
    if store.source() == LoadSource::Backup {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "{} was unreadable; recovered the board from {}",
                store.path().display(),
                store.backup_path().display()
            ))
        );
    }
    Ok(BoardService::with_layout(store, config.canvas.layout.clone()))
}
