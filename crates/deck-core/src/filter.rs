//! Filter composition over tasks.
//!
//! A [`TaskFilter`] holds three independent predicates (status, category,
//! priority) that combine with logical AND. Status is judged against a
//! [`CompletionMap`] rather than the task row, so local overrides can be
//! reconciled with stored state before filtering.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entities::{ScoredTask, Task};
use crate::enums::{Category, Priority};
use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// StatusFilter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::All, Self::Active, Self::Completed]
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "invalid status '{s}', expected one of: all, active, completed"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Either every value passes, or only one exact value does.
///
/// Serialized as the plain string `"All"` or the selected value's spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    #[must_use]
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr<Err = CoreError>> FromStr for Selection<T> {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl<T: fmt::Display> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: FromStr<Err = CoreError>> Deserialize<'de> for Selection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// CompletionMap
// ---------------------------------------------------------------------------

/// Task id to completion flag. Absent ids count as not completed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionMap(BTreeMap<i64, bool>);

impl CompletionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the map from stored task rows.
    #[must_use]
    pub fn from_tasks<T: AsRef<Task>>(tasks: &[T]) -> Self {
        Self(
            tasks
                .iter()
                .map(|t| (t.as_ref().id, t.as_ref().completed))
                .collect(),
        )
    }

    /// Stored state with local overrides applied on top. Overrides win.
    #[must_use]
    pub fn reconcile<T: AsRef<Task>>(stored: &[T], overrides: &Self) -> Self {
        let mut merged = Self::from_tasks(stored);
        for (&id, &completed) in &overrides.0 {
            merged.0.insert(id, completed);
        }
        merged
    }

    #[must_use]
    pub fn is_completed(&self, id: i64) -> bool {
        self.0.get(&id).copied().unwrap_or(false)
    }

    pub fn set(&mut self, id: i64, completed: bool) {
        self.0.insert(id, completed);
    }

    pub fn remove(&mut self, id: i64) -> Option<bool> {
        self.0.remove(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, bool)> + '_ {
        self.0.iter().map(|(&id, &done)| (id, done))
    }
}

impl FromIterator<(i64, bool)> for CompletionMap {
    fn from_iter<I: IntoIterator<Item = (i64, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// TaskFilter
// ---------------------------------------------------------------------------

impl AsRef<Task> for Task {
    fn as_ref(&self) -> &Task {
        self
    }
}

impl AsRef<Task> for ScoredTask {
    fn as_ref(&self) -> &Task {
        &self.task
    }
}

/// Status, category, and priority predicates combined with AND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskFilter {
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub category: Selection<Category>,
    #[serde(default)]
    pub priority: Selection<Priority>,
}

impl TaskFilter {
    /// True when every predicate is `All`.
    #[must_use]
    pub fn is_pass_through(&self) -> bool {
        *self == Self::default()
    }

    #[must_use]
    pub fn matches(&self, task: &Task, completed: &CompletionMap) -> bool {
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Active => !completed.is_completed(task.id),
            StatusFilter::Completed => completed.is_completed(task.id),
        };
        status_ok && self.category.admits(&task.category) && self.priority.admits(&task.priority)
    }
}

/// Return the tasks that pass `filter`, in their input order.
#[must_use]
pub fn apply_filters<T: AsRef<Task> + Clone>(
    tasks: &[T],
    filter: &TaskFilter,
    completed: &CompletionMap,
) -> Vec<T> {
    tasks
        .iter()
        .filter(|t| filter.matches(t.as_ref(), completed))
        .cloned()
        .collect()
}
