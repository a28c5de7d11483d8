use clap::{Args, Subcommand};
use deck_core::enums::{Category, Priority};
use deck_core::filter::{Selection, StatusFilter};

/// Client-state commands. Nothing here touches the server.
#[derive(Clone, Debug, Subcommand)]
pub enum PrefsCommands {
    /// Show remembered filters and completion overrides.
    Show,
    /// Change remembered filters. A filter change resets the page to 1.
    Set(PrefsSetArgs),
    /// Restore `All` filters and page 1.
    Reset,
    /// Record a local completion override for a task.
    Override {
        id: i64,
        #[arg(action = clap::ArgAction::Set)]
        completed: bool,
    },
    /// Drop every completion override.
    ClearOverrides,
}

#[derive(Clone, Debug, Args)]
pub struct PrefsSetArgs {
    #[arg(long)]
    pub status: Option<StatusFilter>,
    #[arg(long)]
    pub category: Option<Selection<Category>>,
    #[arg(long)]
    pub priority: Option<Selection<Priority>>,
    #[arg(long)]
    pub page: Option<i64>,
}
