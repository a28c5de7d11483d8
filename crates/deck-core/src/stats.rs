use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Aggregate completion state for one owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    pub total_tasks: u64,
    pub completed_tasks: u64,
    /// `round(completed / total * 100)`, or 0 when there are no tasks.
    pub completion_percentage: u8,
}

impl CompletionStats {
    #[must_use]
    pub fn new(total_tasks: u64, completed_tasks: u64) -> Self {
        let completion_percentage = if total_tasks == 0 {
            0
        } else {
            // Integer half-up rounding; clamped in case completed > total.
            let pct = (completed_tasks.min(total_tasks) * 200 + total_tasks) / (total_tasks * 2);
            u8::try_from(pct).unwrap_or(100)
        };
        Self {
            total_tasks,
            completed_tasks,
            completion_percentage,
        }
    }

    #[must_use]
    pub const fn active_tasks(&self) -> u64 {
        self.total_tasks.saturating_sub(self.completed_tasks)
    }
}
