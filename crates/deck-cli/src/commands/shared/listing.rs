use chrono::{DateTime, Utc};

use deck_core::entities::Task;
use deck_core::filter::{CompletionMap, TaskFilter, apply_filters};
use deck_core::pipeline::{PageRequest, SortOrder, paginate, sort_tasks_by_priority};
use deck_core::responses::TaskListResponse;
use deck_core::scoring::ScoringConfig;

/// Filter, score, order, and slice one page out of the owner's stored tasks.
#[must_use]
pub fn task_page(
    stored: &[Task],
    completed: &CompletionMap,
    filter: &TaskFilter,
    request: PageRequest,
    order: SortOrder,
    scoring: &ScoringConfig,
    now: DateTime<Utc>,
) -> TaskListResponse {
    let filtered = apply_filters(stored, filter, completed);
    let ordered = sort_tasks_by_priority(&filtered, order, scoring, now);
    paginate(&ordered, request).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use deck_core::enums::{Category, Priority};
    use deck_core::filter::StatusFilter;
    use deck_core::pipeline::PageLimits;
    use pretty_assertions::assert_eq;

    fn task(id: i64, priority: Priority, completed: bool, now: DateTime<Utc>) -> Task {
        Task {
            id,
            user_id: "usr-1".into(),
            title: format!("task {id}"),
            description: None,
            category: Category::Backend,
            priority,
            complexity: None,
            deadline: None,
            estimated_hours: None,
            dependencies: vec![],
            tags: vec![],
            completed,
            completed_at: completed.then_some(now),
            created_at: now - Duration::minutes(id),
        }
    }

    #[test]
    fn override_hides_task_from_active_page() {
        let now = Utc::now();
        let stored = vec![
            task(1, Priority::Low, false, now),
            task(2, Priority::Critical, false, now),
            task(3, Priority::Medium, true, now),
        ];
        let mut overrides = CompletionMap::new();
        overrides.set(2, true);
        let completed = CompletionMap::reconcile(&stored, &overrides);

        let filter = TaskFilter {
            status: StatusFilter::Active,
            ..TaskFilter::default()
        };
        let page = task_page(
            &stored,
            &completed,
            &filter,
            PageRequest::new(None, None, &PageLimits::default()),
            SortOrder::Score,
            &ScoringConfig::default(),
            now,
        );

        let ids: Vec<i64> = page.items.iter().map(|t| t.task.id).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(page.pagination.total, 1);
        assert!(!page.pagination.has_more);
    }

    #[test]
    fn rank_order_puts_critical_first() {
        let now = Utc::now();
        let stored = vec![
            task(1, Priority::Low, false, now),
            task(2, Priority::Critical, false, now),
            task(3, Priority::High, false, now),
        ];
        let page = task_page(
            &stored,
            &CompletionMap::from_tasks(&stored),
            &TaskFilter::default(),
            PageRequest::new(Some(1), Some(2), &PageLimits::default()),
            SortOrder::Rank,
            &ScoringConfig::default(),
            now,
        );
        let ids: Vec<i64> = page.items.iter().map(|t| t.task.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(page.pagination.total_pages, 2);
        assert!(page.pagination.has_more);
    }
}
