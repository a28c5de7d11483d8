use clap::{Args, Subcommand};
use deck_core::enums::{Category, Complexity, Priority};
use deck_core::filter::{Selection, StatusFilter};
use deck_core::pipeline::SortOrder;

/// Task commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// List one page of prioritized tasks.
    List(TaskListArgs),
    /// Create a task.
    Create(TaskCreateArgs),
    /// Get a task by ID.
    Get { id: i64 },
    /// Flip a task between completed and active.
    Toggle { id: i64 },
    /// Mark a task completed (or active again with --undo).
    Complete {
        id: i64,
        #[arg(long)]
        undo: bool,
    },
    /// Completion totals.
    Stats,
    /// Load pages incrementally into a bounded window.
    Feed(TaskFeedArgs),
}

#[derive(Clone, Debug, Default, Args)]
pub struct TaskListArgs {
    /// Page number (1-based). Defaults to the remembered page.
    #[arg(long)]
    pub page: Option<i64>,
    #[arg(long)]
    pub page_size: Option<i64>,
    /// all, active, completed
    #[arg(long)]
    pub status: Option<StatusFilter>,
    /// all, or a category name
    #[arg(long)]
    pub category: Option<Selection<Category>>,
    /// all, or a priority name
    #[arg(long)]
    pub priority: Option<Selection<Priority>>,
    /// score (default) or rank
    #[arg(long)]
    pub order: Option<SortOrder>,
}

#[derive(Clone, Debug, Args)]
pub struct TaskCreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub category: Category,
    #[arg(long)]
    pub priority: Priority,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub complexity: Option<Complexity>,
    /// Deadline as RFC 3339 (`2025-11-01T17:00:00Z`).
    #[arg(long, conflicts_with = "due_in_days")]
    pub deadline: Option<String>,
    /// Deadline relative to now, in days.
    #[arg(long)]
    pub due_in_days: Option<i64>,
    #[arg(long)]
    pub hours: Option<f64>,
    /// Comma-separated task IDs this task depends on.
    #[arg(long, value_delimiter = ',')]
    pub depends_on: Vec<i64>,
    /// Comma-separated tags.
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct TaskFeedArgs {
    /// How many "load more" steps to run.
    #[arg(long, default_value_t = 1)]
    pub pages: usize,
    #[arg(long)]
    pub page_size: Option<i64>,
    #[arg(long)]
    pub order: Option<SortOrder>,
}
