use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::AuthCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Record a lift.
    Add(AddArgs),
    /// List recorded entries, oldest first.
    List(ListArgs),
    /// Delete one entry by id.
    Delete(DeleteArgs),
    /// Delete every entry (asks for confirmation).
    Clear(ClearArgs),
    /// Replace all entries with the contents of a JSON export.
    Import(ImportArgs),
    /// Write all entries to a dated JSON file.
    Export(ExportArgs),
    /// Weight progression for one exercise.
    Chart(ChartArgs),
    /// Selectable exercise names.
    Exercises,
    /// Re-fetch entries from the remote table.
    Sync,
    /// Passwordless sign-in.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct AddArgs {
    /// Weight in kg; `82.5` and `82,5` are both accepted.
    pub weight: String,
    /// Exercise name (defaults to `general.default_exercise`).
    #[arg(short, long)]
    pub exercise: Option<String>,
    /// Repetitions.
    #[arg(short, long)]
    pub reps: Option<String>,
    /// Date as YYYY-MM-DD (defaults to today).
    #[arg(short, long)]
    pub date: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Only entries for this exercise.
    #[arg(short, long)]
    pub exercise: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct DeleteArgs {
    /// Entry id (`ent-...`).
    pub id: String,
}

#[derive(Clone, Debug, Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// JSON file holding an array of entries.
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Target directory (defaults to the current directory).
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct ChartArgs {
    /// Exercise to chart (defaults to `general.default_exercise`).
    pub exercise: Option<String>,
}
