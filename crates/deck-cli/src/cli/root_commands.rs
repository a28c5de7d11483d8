use clap::{Args, Subcommand};

use crate::cli::subcommands::{AuthCommands, PrefsCommands, TaskCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Register, log in, and manage the stored session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Tasks.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Locally persisted filters and completion overrides.
    Prefs {
        #[command(subcommand)]
        action: PrefsCommands,
    },
    /// Serve the JSON HTTP API.
    Serve(ServeArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Listen address (defaults to `server.addr`).
    #[arg(long)]
    pub addr: Option<String>,
}
