//! Task update builder.

use serde::Serialize;

/// Fields a task owner may change after creation.
///
/// Only completion is mutable; every other field is fixed at creation.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.completed.is_none()
    }
}

#[derive(Default)]
pub struct TaskUpdateBuilder(TaskUpdate);

impl TaskUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn completed(mut self, completed: bool) -> Self {
        self.0.completed = Some(completed);
        self
    }

    #[must_use]
    pub const fn build(self) -> TaskUpdate {
        self.0
    }
}
