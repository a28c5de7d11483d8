//! Cross-cutting error types for TaskDeck.
//!
//! Storage and authentication errors live in their own crates
//! (`DatabaseError`, `AuthError`). The HTTP layer folds all of them into a
//! status code at the edge.

use thiserror::Error;

/// Errors that can be raised by any TaskDeck crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The entity does not exist, or exists but belongs to another owner.
    /// Both cases share one message so callers cannot probe for foreign ids.
    #[error("{entity_type} not found or unauthorized: {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (missing fields, bad vocabulary, ranges).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Build the undifferentiated not-found error for a task id.
    #[must_use]
    pub fn task_not_found(id: i64) -> Self {
        Self::NotFound {
            entity_type: "task".to_string(),
            id: id.to_string(),
        }
    }
}
