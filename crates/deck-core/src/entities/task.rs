use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Category, Complexity, Priority};
use crate::errors::CoreError;

/// A unit of work owned by one user.
///
/// `completed_at` is set exactly when `completed` is true. Dependencies are
/// informational and only ever reference tasks of the same owner.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub priority: Priority,
    pub complexity: Option<Complexity>,
    pub deadline: Option<DateTime<Utc>>,
    pub estimated_hours: Option<f64>,
    pub dependencies: Vec<i64>,
    pub tags: Vec<String>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A task annotated with its score at evaluation time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    pub priority_score: f64,
}

/// Input for creating a task. Storage assigns `id`, `created_at`, and the owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub complexity: Option<Complexity>,
    pub deadline: Option<DateTime<Utc>>,
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub dependencies: Vec<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewTask {
    /// Check required fields and return a normalized copy.
    ///
    /// Trims the title and description, drops blank and duplicate tags, and
    /// removes duplicate dependency ids while keeping their first-seen order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the title is blank, priority or
    /// category is missing, or `estimated_hours` is negative or not finite.
    pub fn normalize(mut self) -> Result<Self, CoreError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CoreError::Validation("title is required".into()));
        }
        self.title = title.to_string();

        if self.priority.is_none() {
            return Err(CoreError::Validation("priority is required".into()));
        }
        if self.category.is_none() {
            return Err(CoreError::Validation("category is required".into()));
        }

        if let Some(hours) = self.estimated_hours.filter(|h| !h.is_finite() || *h < 0.0) {
            return Err(CoreError::Validation(format!(
                "estimatedHours must be a non-negative number, got {hours}"
            )));
        }

        self.description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags.drain(..) {
            let tag = tag.trim().to_string();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        self.tags = tags;

        let mut deps: Vec<i64> = Vec::with_capacity(self.dependencies.len());
        for dep in self.dependencies.drain(..) {
            if !deps.contains(&dep) {
                deps.push(dep);
            }
        }
        self.dependencies = deps;

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn draft() -> NewTask {
        NewTask {
            title: "  Ship it  ".into(),
            priority: Some(Priority::High),
            category: Some(Category::Backend),
            ..Default::default()
        }
    }

    #[test]
    fn normalize_trims_title() {
        let task = draft().normalize().unwrap();
        assert_eq!(task.title, "Ship it");
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = NewTask {
            title: "   ".into(),
            ..draft()
        }
        .normalize()
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn missing_priority_is_rejected() {
        let err = NewTask {
            priority: None,
            ..draft()
        }
        .normalize()
        .unwrap_err();
        assert!(err.to_string().contains("priority"));
    }

    #[test]
    fn negative_hours_are_rejected() {
        let err = NewTask {
            estimated_hours: Some(-1.0),
            ..draft()
        }
        .normalize()
        .unwrap_err();
        assert!(err.to_string().contains("estimatedHours"));
    }

    #[test]
    fn nan_hours_are_rejected() {
        assert!(
            NewTask {
                estimated_hours: Some(f64::NAN),
                ..draft()
            }
            .normalize()
            .is_err()
        );
    }

    #[test]
    fn tags_and_dependencies_are_deduplicated() {
        let task = NewTask {
            tags: vec!["api".into(), " api ".into(), String::new(), "db".into()],
            dependencies: vec![3, 1, 3],
            ..draft()
        }
        .normalize()
        .unwrap();
        assert_eq!(task.tags, vec!["api".to_string(), "db".to_string()]);
        assert_eq!(task.dependencies, vec![3, 1]);
    }

    #[test]
    fn blank_description_becomes_none() {
        let task = NewTask {
            description: Some("  ".into()),
            ..draft()
        }
        .normalize()
        .unwrap();
        assert_eq!(task.description, None);
    }
}
