use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "todo", about = concat!("todo v", env!("CARGO_PKG_VERSION"), " - a small to-do list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a commented config.toml into the data directory
    Init(InitArgs),
    /// List tasks grouped by status
    List(ListArgs),
    /// Show one task
    Show(IdArg),
    /// Find tasks whose title or description contains text
    Search(SearchArgs),
    /// Show task counts per status
    Stats,
    /// Add a task (it goes to the top of the list)
    Add(AddArgs),
    /// Change fields of a task
    Edit(EditArgs),
    /// Change task status
    State(StateArgs),
    /// Start a task (shortcut for state <ID> in-progress)
    Start(IdArg),
    /// Complete a task (shortcut for state <ID> completed)
    Done(IdArg),
    /// Delete a task
    Delete(IdArg),
    /// View or prune the diagnostics log
    Diagnostics(DiagnosticsCmd),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config.toml
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Only show this status (pending, in-progress, completed)
    #[arg(long)]
    pub status: Option<String>,
    /// Only show tasks matching this text
    #[arg(long, short = 'q')]
    pub query: Option<String>,
}

#[derive(Args)]
pub struct IdArg {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for (case-insensitive)
    pub query: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Longer description
    #[arg(long, short = 'd')]
    pub description: Option<String>,
    /// Date label (default: today)
    #[arg(long)]
    pub date: Option<String>,
    /// Initial status (default: pending)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID
    pub id: String,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description
    #[arg(long, short = 'd', conflicts_with = "clear_description")]
    pub description: Option<String>,
    /// Remove the description
    #[arg(long)]
    pub clear_description: bool,
    /// New date label
    #[arg(long)]
    pub date: Option<String>,
    /// New status
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct StateArgs {
    /// Task ID
    pub id: String,
    /// New status (pending, in-progress, completed)
    pub status: String,
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct DiagnosticsCmd {
    #[command(subcommand)]
    pub action: Option<DiagnosticsAction>,
    /// Maximum number of entries to show
    #[arg(long, default_value = "10")]
    pub limit: usize,
}

#[derive(Subcommand)]
pub enum DiagnosticsAction {
    /// Remove old entries
    Prune(DiagnosticsPruneArgs),
}

#[derive(Args)]
pub struct DiagnosticsPruneArgs {
    /// Remove every entry, not just old ones
    #[arg(long)]
    pub all: bool,
}
