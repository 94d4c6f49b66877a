use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Read-only viewer over project-service task snapshots.
/// Snapshots default to ~/.taskplan or a directory passed via --data.
#[derive(Parser)]
#[command(name = "tp", version, about = "Project timeline and dependency viewer")]
pub struct Cli {
    /// Directory holding the service's JSON snapshots.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
