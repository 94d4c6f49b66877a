//! # TP - Project Timeline Viewer
//!
//! A read-only terminal viewer over project/task snapshots exported by a
//! project service. It derives everything it shows at load time: project
//! schedule metrics, the task dependency graph (prerequisites and
//! dependents), parent-child trees, date-range and upcoming filters, and
//! Gantt-style timeline layout.
//!
//! ## Key Commands
//!
//! - `tp projects` - Metrics overview across every project
//! - `tp list <project>` - Filterable task listing, optionally as a tree
//! - `tp path <project> <id>` - Everything that must precede a task
//! - `tp impact <project> <id>` - Everything affected if a task slips
//! - `tp gantt <project>` - ASCII timeline chart
//! - `tp ui <project>` - Interactive Gantt interface
//!
//! Snapshots live in `~/.taskplan` (or `--data <dir>`): a `projects.json`
//! index plus one `tasks_<id>.json` payload per project, both in the
//! service's JSON wire format. The service owns all task CRUD; this tool
//! never writes.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod fields;
pub mod graph;
pub mod metrics;
pub mod store;
pub mod task;
pub mod timeline;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod run;
}

use cli::Cli;
use cmd::*;
use store::Workspace;

fn main() {
    let cli = Cli::parse();

    // Completions need no workspace.
    if let Commands::Completions { shell } = &cli.command {
        cmd_completions(*shell);
        return;
    }

    let data_dir = cli.data.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".taskplan")
    });

    let ws = match Workspace::discover(&data_dir) {
        Ok(ws) => ws,
        Err(e) => {
            eprintln!("No snapshot workspace at {}: {e}", data_dir.display());
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Completions { .. } => unreachable!("completions handled above"),

        Commands::Projects => cmd_projects(&ws),

        Commands::List { project, status, from, to, upcoming, tree, sort, limit } =>
            cmd_list(&ws, project, status, from, to, upcoming, tree, sort, limit),

        Commands::View { project, id } => cmd_view(&ws, project, id),

        Commands::Path { project, id } => cmd_path(&ws, project, id),

        Commands::Impact { project, id } => cmd_impact(&ws, project, id),

        Commands::Tree { project } => cmd_tree(&ws, project),

        Commands::Agenda { project } => cmd_agenda(&ws, project),

        Commands::Gantt { project, width } => cmd_gantt(&ws, project, width),

        Commands::Ui { project } => cmd_ui(&ws, project),
    }
}
