use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{ScoredTask, Task};
use crate::errors::CoreError;
use crate::scoring::ScoringConfig;

/// How a task list is ordered before paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Descending priority score, newest first on ties.
    #[default]
    Score,
    /// Ascending priority rank (CRITICAL first), newest first on ties.
    Rank,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Score => "score",
            Self::Rank => "rank",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "score" => Ok(Self::Score),
            "rank" => Ok(Self::Rank),
            _ => Err(CoreError::Validation(format!(
                "invalid order '{s}', expected one of: score, rank"
            ))),
        }
    }
}

fn newest_first(a: &Task, b: &Task) -> Ordering {
    b.created_at.cmp(&a.created_at)
}

/// Stable sort by descending score, then descending `created_at`.
pub fn sort_by_score(tasks: &mut [ScoredTask]) {
    tasks.sort_by(|a, b| {
        b.priority_score
            .total_cmp(&a.priority_score)
            .then_with(|| newest_first(&a.task, &b.task))
    });
}

/// Stable sort by ascending priority rank, then descending `created_at`.
pub fn sort_by_rank<T: AsRef<Task>>(tasks: &mut [T]) {
    tasks.sort_by(|a, b| {
        let (a, b) = (a.as_ref(), b.as_ref());
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| newest_first(a, b))
    });
}

/// Score every task at `now` and return them in the requested order.
/// The input is left untouched.
#[must_use]
pub fn sort_tasks_by_priority(
    tasks: &[Task],
    order: SortOrder,
    config: &ScoringConfig,
    now: DateTime<Utc>,
) -> Vec<ScoredTask> {
    let mut scored = config.score_all(tasks, now);
    match order {
        SortOrder::Score => sort_by_score(&mut scored),
        SortOrder::Rank => sort_by_rank(&mut scored),
    }
    scored
}
