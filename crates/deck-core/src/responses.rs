//! Response shapes returned as JSON by the `deck` CLI and the HTTP API.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{ScoredTask, Task};
use crate::pipeline::Page;
use crate::stats::CompletionStats;

/// Paging metadata attached to list responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_more: bool,
}

/// Response from `GET /api/tasks` and `deck task list`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TaskListResponse {
    pub items: Vec<ScoredTask>,
    pub pagination: Pagination,
}

impl From<Page<ScoredTask>> for TaskListResponse {
    fn from(page: Page<ScoredTask>) -> Self {
        Self {
            pagination: Pagination {
                page: page.page,
                page_size: page.page_size,
                total: page.total,
                total_pages: page.total_pages,
                has_more: page.has_next,
            },
            items: page.items,
        }
    }
}

/// Response from the completion toggle.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub task: Task,
    pub completion_stats: CompletionStats,
}

/// Response from registration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub id: String,
    pub email: String,
    pub seeded_tasks: usize,
}

/// Response from login.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Response from `deck task feed`: the buffered window after loading.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub items: Vec<ScoredTask>,
    /// Absolute position of the first buffered item.
    pub offset: usize,
    pub pages_loaded: usize,
    pub trimmed: usize,
    pub exhausted: bool,
}

/// Error body returned by the HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
