//! Priority scoring engine.
//!
//! A score is a pure function of a task and an explicit `now`. Two schemes
//! exist and one [`ScoringConfig`] selects which one a deployment uses:
//!
//! ```text
//! weighted  = priority + category + deadline urgency + complexity
//!           + 5 * dependencies + effort
//! composite = priority * 10 + category * 2 + recency - completed penalty
//! ```
//!
//! Scores are always finite and never negative.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{ScoredTask, Task};
use crate::enums::{Category, Complexity, Priority};

const MS_PER_DAY: f64 = 86_400_000.0;
const DEPENDENCY_BONUS: f64 = 5.0;
const RECENCY_MAX_BONUS: f64 = 10.0;
const RECENCY_WINDOW_DAYS: f64 = 7.0;
const COMPLETED_PENALTY: f64 = 100.0;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Which scoring formula to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringScheme {
    #[default]
    Weighted,
    Composite,
}

/// Base weight per stated priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            critical: 100.0,
            high: 75.0,
            medium: 50.0,
            low: 25.0,
        }
    }
}

impl PriorityWeights {
    /// The impact table with three levels (high 100, medium 60, low 30).
    /// `CRITICAL` weighs the same as `HIGH` under it.
    #[must_use]
    pub const fn three_level() -> Self {
        Self {
            critical: 100.0,
            high: 100.0,
            medium: 60.0,
            low: 30.0,
        }
    }

    #[must_use]
    pub const fn weight(&self, priority: Priority) -> f64 {
        match priority {
            Priority::Critical => self.critical,
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

fn default_category_weights() -> BTreeMap<Category, f64> {
    BTreeMap::from([
        (Category::Backend, 10.0),
        (Category::Frontend, 8.0),
        (Category::DevOps, 9.0),
        (Category::Database, 7.0),
        (Category::Security, 10.0),
        (Category::Testing, 6.0),
    ])
}

const fn default_category_weight() -> f64 {
    5.0
}

/// Scheme selection and weight tables for the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub scheme: ScoringScheme,

    #[serde(default)]
    pub priority_weights: PriorityWeights,

    /// Categories absent from this table score `default_category_weight`.
    #[serde(default = "default_category_weights")]
    pub category_weights: BTreeMap<Category, f64>,

    #[serde(default = "default_category_weight")]
    pub default_category_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            scheme: ScoringScheme::default(),
            priority_weights: PriorityWeights::default(),
            category_weights: default_category_weights(),
            default_category_weight: default_category_weight(),
        }
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

impl ScoringConfig {
    #[must_use]
    pub fn with_scheme(scheme: ScoringScheme) -> Self {
        Self {
            scheme,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn category_weight(&self, category: Category) -> f64 {
        self.category_weights
            .get(&category)
            .copied()
            .unwrap_or(self.default_category_weight)
    }

    /// Score one task with the configured scheme.
    #[must_use]
    pub fn score(&self, task: &Task, now: DateTime<Utc>) -> f64 {
        let raw = match self.scheme {
            ScoringScheme::Weighted => self.weighted(task, now),
            ScoringScheme::Composite => self.composite(task, now),
        };
        sanitize(raw)
    }

    /// Score every task, preserving input order.
    #[must_use]
    pub fn score_all(&self, tasks: &[Task], now: DateTime<Utc>) -> Vec<ScoredTask> {
        tasks
            .iter()
            .map(|task| ScoredTask {
                priority_score: self.score(task, now),
                task: task.clone(),
            })
            .collect()
    }

    fn weighted(&self, task: &Task, now: DateTime<Utc>) -> f64 {
        let deadline = task.deadline.map_or(0.0, |d| deadline_bonus(d, now));
        #[allow(clippy::cast_precision_loss)]
        let dependencies = DEPENDENCY_BONUS * task.dependencies.len() as f64;

        self.priority_weights.weight(task.priority)
            + self.category_weight(task.category)
            + deadline
            + complexity_bonus(task.complexity)
            + dependencies
            + effort_bonus(task.estimated_hours)
    }

    fn composite(&self, task: &Task, now: DateTime<Utc>) -> f64 {
        let penalty = if task.completed { COMPLETED_PENALTY } else { 0.0 };
        self.priority_weights.weight(task.priority) * 10.0
            + self.category_weight(task.category) * 2.0
            + recency_bonus(task.created_at, now)
            - penalty
    }
}

/// Score with the default weighted scheme and tables.
#[must_use]
pub fn score(task: &Task, now: DateTime<Utc>) -> f64 {
    ScoringConfig::default().score(task, now)
}

/// Whole days until `deadline`, rounded up. Negative when overdue.
#[must_use]
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let ms = (deadline - now).num_milliseconds() as f64;
    (ms / MS_PER_DAY).ceil()
}

#[must_use]
pub fn deadline_bonus(deadline: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let days = days_until(deadline, now);
    if days < 0.0 {
        50.0
    } else if days <= 1.0 {
        40.0
    } else if days <= 3.0 {
        30.0
    } else if days <= 7.0 {
        20.0
    } else if days <= 14.0 {
        10.0
    } else {
        0.0
    }
}

#[must_use]
pub const fn complexity_bonus(complexity: Option<Complexity>) -> f64 {
    match complexity {
        Some(Complexity::High) => 15.0,
        Some(Complexity::Medium) => 10.0,
        Some(Complexity::Low) => 5.0,
        None => 0.0,
    }
}

#[must_use]
pub fn effort_bonus(estimated_hours: Option<f64>) -> f64 {
    match estimated_hours {
        Some(h) if h > 8.0 => 10.0,
        Some(h) if h > 4.0 => 5.0,
        _ => 0.0,
    }
}

/// Linear decay from +10 at creation to 0 after seven days. Future
/// timestamps earn nothing.
#[must_use]
pub fn recency_bonus(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let days = (now - created_at).num_milliseconds() as f64 / MS_PER_DAY;
    if (0.0..=RECENCY_WINDOW_DAYS).contains(&days) {
        (RECENCY_MAX_BONUS - days * (RECENCY_MAX_BONUS / RECENCY_WINDOW_DAYS)).max(0.0)
    } else {
        0.0
    }
}

fn sanitize(raw: f64) -> f64 {
    if raw.is_finite() { raw.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 15, 12, 0, 0).unwrap()
    }

    fn task(priority: Priority, category: Category) -> Task {
        Task {
            id: 1,
            user_id: "usr-test".into(),
            title: "t".into(),
            description: None,
            category,
            priority,
            complexity: None,
            deadline: None,
            estimated_hours: None,
            dependencies: vec![],
            tags: vec![],
            completed: false,
            completed_at: None,
            created_at: now() - Duration::days(30),
        }
    }

    #[rstest]
    #[case(Duration::hours(-25), 50.0)]
    #[case(Duration::days(-5), 50.0)]
    // less than a day overdue rounds up to "due today"
    #[case(Duration::hours(-2), 40.0)]
    #[case(Duration::hours(0), 40.0)]
    #[case(Duration::hours(20), 40.0)]
    #[case(Duration::hours(25), 30.0)]
    #[case(Duration::days(3), 30.0)]
    #[case(Duration::days(6) + Duration::hours(1), 20.0)]
    #[case(Duration::days(10), 10.0)]
    #[case(Duration::days(14), 10.0)]
    #[case(Duration::days(14) + Duration::minutes(1), 0.0)]
    fn deadline_bonus_steps(#[case] offset: Duration, #[case] expected: f64) {
        assert_eq!(deadline_bonus(now() + offset, now()), expected);
    }

    #[rstest]
    #[case(None, 0.0)]
    #[case(Some(2.0), 0.0)]
    #[case(Some(4.0), 0.0)]
    #[case(Some(4.5), 5.0)]
    #[case(Some(8.0), 5.0)]
    #[case(Some(12.0), 10.0)]
    fn effort_bonus_thresholds(#[case] hours: Option<f64>, #[case] expected: f64) {
        assert_eq!(effort_bonus(hours), expected);
    }

    #[test]
    fn weighted_sums_every_component() {
        let mut t = task(Priority::High, Category::Security);
        t.complexity = Some(Complexity::High);
        t.deadline = Some(now() + Duration::days(2));
        t.dependencies = vec![2, 3];
        t.estimated_hours = Some(10.0);
        // 75 + 10 + 30 + 15 + 10 + 10
        assert_eq!(score(&t, now()), 150.0);
    }

    #[test]
    fn weighted_minimal_task_is_priority_plus_category() {
        let t = task(Priority::Low, Category::Testing);
        assert_eq!(score(&t, now()), 31.0);
    }

    #[test]
    fn missing_category_weight_falls_back() {
        let mut config = ScoringConfig::default();
        config.category_weights.remove(&Category::Frontend);
        let t = task(Priority::Medium, Category::Frontend);
        assert_eq!(config.score(&t, now()), 55.0);
    }

    #[test]
    fn composite_rewards_recent_tasks() {
        let config = ScoringConfig::with_scheme(ScoringScheme::Composite);
        let mut t = task(Priority::Medium, Category::Backend);
        t.created_at = now();
        assert_eq!(config.score(&t, now()), 530.0);

        t.created_at = now() - Duration::days(7);
        assert_eq!(config.score(&t, now()), 520.0);
    }

    #[test]
    fn composite_ignores_future_creation() {
        let config = ScoringConfig::with_scheme(ScoringScheme::Composite);
        let mut t = task(Priority::Low, Category::Testing);
        t.created_at = now() + Duration::days(1);
        assert_eq!(config.score(&t, now()), 262.0);
    }

    #[test]
    fn composite_penalizes_completion_and_floors_at_zero() {
        let mut config = ScoringConfig::with_scheme(ScoringScheme::Composite);
        config.priority_weights.low = 1.0;
        let mut t = task(Priority::Low, Category::Testing);
        t.completed = true;
        // 10 + 12 - 100 would be negative
        assert_eq!(config.score(&t, now()), 0.0);
    }

    #[test]
    fn non_finite_scores_collapse_to_zero() {
        let mut config = ScoringConfig::default();
        config.priority_weights.high = f64::NAN;
        let t = task(Priority::High, Category::Backend);
        assert_eq!(config.score(&t, now()), 0.0);

        config.priority_weights.high = f64::INFINITY;
        assert_eq!(config.score(&t, now()), 0.0);
    }

    #[test]
    fn three_level_table_ties_critical_and_high() {
        let weights = PriorityWeights::three_level();
        assert_eq!(
            weights.weight(Priority::Critical),
            weights.weight(Priority::High)
        );
        assert_eq!(weights.weight(Priority::Low), 30.0);
    }

    #[test]
    fn score_all_keeps_order() {
        let tasks = vec![
            task(Priority::Low, Category::Testing),
            task(Priority::Critical, Category::Backend),
        ];
        let scored = ScoringConfig::default().score_all(&tasks, now());
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].priority_score, 31.0);
        assert_eq!(scored[1].priority_score, 110.0);
    }
}
