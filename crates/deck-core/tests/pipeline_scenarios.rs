//! End-to-end runs of score, filter, sort, and page over the seed catalogue.

use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use deck_core::entities::{ScoredTask, Task};
use deck_core::filter::{CompletionMap, Selection, StatusFilter, TaskFilter, apply_filters};
use deck_core::pipeline::{
    LoadCoordinator, PageLimits, PageRequest, SortOrder, WindowBuffer, WindowConfig, paginate,
    sort_tasks_by_priority,
};
use deck_core::scoring::{ScoringConfig, ScoringScheme};
use deck_core::seed::{catalogue, resolve_dependencies};
use deck_core::enums::Category;
use pretty_assertions::assert_eq;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 15, 8, 0, 0).unwrap()
}

/// Materialize the catalogue the way storage would, with ids starting at 1.
fn seeded_tasks() -> Vec<Task> {
    let ids: HashMap<u32, i64> = catalogue()
        .iter()
        .enumerate()
        .map(|(i, s)| (s.number, i64::try_from(i).unwrap() + 1))
        .collect();
    catalogue()
        .iter()
        .enumerate()
        .map(|(i, seed)| {
            let draft = seed.to_new_task(now()).normalize().unwrap();
            Task {
                id: i64::try_from(i).unwrap() + 1,
                user_id: "usr-seeded".into(),
                title: draft.title,
                description: draft.description,
                category: draft.category.unwrap(),
                priority: draft.priority.unwrap(),
                complexity: draft.complexity,
                deadline: draft.deadline,
                estimated_hours: draft.estimated_hours,
                dependencies: resolve_dependencies(seed, &ids),
                tags: draft.tags,
                completed: false,
                completed_at: None,
                created_at: now() - Duration::minutes(i64::try_from(i).unwrap()),
            }
        })
        .collect()
}

#[test]
fn active_filter_over_54_with_6_complete() {
    let tasks = seeded_tasks();
    let completed: CompletionMap = (1..=6).map(|id| (id, true)).collect();
    let filter = TaskFilter {
        status: StatusFilter::Active,
        ..Default::default()
    };

    let filtered = apply_filters(&tasks, &filter, &completed);
    let ordered = sort_tasks_by_priority(&filtered, SortOrder::Score, &ScoringConfig::default(), now());
    let limits = PageLimits::default();

    let first = paginate(&ordered, PageRequest::new(Some(1), Some(10), &limits));
    assert_eq!(first.total, 48);
    assert_eq!(first.total_pages, 5);

    let last = paginate(&ordered, PageRequest::new(Some(5), Some(10), &limits));
    assert_eq!(last.items.len(), 8);
    assert!(!last.has_next);

    let clamped = paginate(&ordered, PageRequest::new(Some(40), Some(10), &limits));
    assert_eq!(clamped.page, 5);
    assert_eq!(clamped.items, last.items);
}

#[test]
fn pages_cover_every_task_exactly_once() {
    let tasks = seeded_tasks();
    let ordered = sort_tasks_by_priority(&tasks, SortOrder::Score, &ScoringConfig::default(), now());
    let limits = PageLimits::default();
    let mut seen: Vec<i64> = Vec::new();
    for page in 1..=6 {
        let p = paginate(&ordered, PageRequest::new(Some(page), Some(10), &limits));
        seen.extend(p.items.iter().map(|t| t.task.id));
    }
    assert_eq!(seen.len(), 54);
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 54);
}

#[test]
fn scores_are_non_negative_under_both_schemes() {
    let mut tasks = seeded_tasks();
    for t in tasks.iter_mut().step_by(3) {
        t.completed = true;
    }
    for scheme in [ScoringScheme::Weighted, ScoringScheme::Composite] {
        let config = ScoringConfig::with_scheme(scheme);
        for scored in config.score_all(&tasks, now()) {
            assert!(scored.priority_score >= 0.0);
            assert!(scored.priority_score.is_finite());
        }
    }
}

#[test]
fn score_order_is_non_increasing() {
    let ordered = sort_tasks_by_priority(
        &seeded_tasks(),
        SortOrder::Score,
        &ScoringConfig::default(),
        now(),
    );
    for pair in ordered.windows(2) {
        assert!(pair[0].priority_score >= pair[1].priority_score);
    }
}

#[test]
fn category_and_status_compose() {
    let tasks = seeded_tasks();
    let completed = CompletionMap::from_tasks(&tasks);
    let filter = TaskFilter {
        status: StatusFilter::Active,
        category: Selection::Only(Category::Security),
        priority: Selection::All,
    };
    let filtered = apply_filters(&tasks, &filter, &completed);
    assert!(!filtered.is_empty());
    assert!(filtered.iter().all(|t| t.category == Category::Security));
}

#[test]
fn windowed_loading_trims_to_most_recent() {
    // Three copies of the catalogue so the source outlasts the window.
    let mut items: Vec<ScoredTask> = Vec::new();
    for round in 0..3 {
        items.extend(
            sort_tasks_by_priority(&seeded_tasks(), SortOrder::Rank, &ScoringConfig::default(), now())
                .into_iter()
                .map(|mut s| {
                    s.task.id += round * 100;
                    s
                }),
        );
    }
    let guard = LoadCoordinator::new();
    let mut buffer = WindowBuffer::new(WindowConfig::default());
    let request = |page: usize| PageRequest {
        page,
        page_size: 10,
    };

    let mut total_trimmed = 0;
    while buffer.len() + buffer.offset() < 130 {
        let ticket = guard.begin().expect("no load in flight");
        assert!(guard.begin().is_none());
        let batch = paginate(&items, request(buffer.next_page())).items;
        let batch = ticket.complete(batch).expect("ticket still current");
        total_trimmed += buffer.append(batch, 10).trimmed;
    }

    assert_eq!(buffer.len(), 100);
    assert_eq!(total_trimmed, 30);
    assert_eq!(buffer.offset(), 30);
    assert_eq!(buffer.items()[0].task.id, items[30].task.id);
    assert_eq!(buffer.items()[99].task.id, items[129].task.id);
}
