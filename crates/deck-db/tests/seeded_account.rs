//! Scenarios over a freshly registered account with the full catalogue.

use chrono::Utc;
use deck_core::filter::{CompletionMap, StatusFilter, TaskFilter, apply_filters};
use deck_core::pipeline::{PageLimits, PageRequest, SortOrder, paginate, sort_tasks_by_priority};
use deck_core::scoring::ScoringConfig;
use deck_core::seed::catalogue;
use deck_db::DeckService;
use deck_db::repos::tasks::TaskQuery;
use pretty_assertions::assert_eq;

async fn seeded() -> (DeckService, String) {
    let svc = DeckService::new_local(":memory:").await.unwrap();
    let reg = svc
        .register_with_catalogue("seeded@example.com", None, "hash", catalogue())
        .await
        .unwrap();
    (svc, reg.user.id)
}

#[tokio::test]
async fn active_listing_after_six_completions() {
    let (svc, owner) = seeded().await;
    let all = svc.find_by_owner(&owner, &TaskQuery::default()).await.unwrap();
    for task in all.iter().take(6) {
        svc.toggle_completion(&owner, task.id).await.unwrap();
    }

    let active = TaskFilter {
        status: StatusFilter::Active,
        ..Default::default()
    };
    assert_eq!(svc.count_tasks(&owner, &active).await.unwrap(), 48);

    // same answer through the in-memory pipeline
    let stored = svc.find_by_owner(&owner, &TaskQuery::default()).await.unwrap();
    let completed = CompletionMap::from_tasks(&stored);
    let filtered = apply_filters(&stored, &active, &completed);
    let ordered =
        sort_tasks_by_priority(&filtered, SortOrder::Score, &ScoringConfig::default(), Utc::now());
    let page = paginate(
        &ordered,
        PageRequest::new(Some(5), Some(10), &PageLimits::default()),
    );
    assert_eq!(page.total, 48);
    assert_eq!(page.total_pages, 5);
    assert_eq!(page.items.len(), 8);
}

#[tokio::test]
async fn toggling_task_seven_bumps_completed_by_one() {
    let (svc, owner) = seeded().await;
    let all = svc.find_by_owner(&owner, &TaskQuery::default()).await.unwrap();
    let seventh = &all[6];
    assert!(!seventh.completed);

    let before = svc.completion_stats(&owner).await.unwrap();
    let started = Utc::now();
    let response = svc.toggle_with_stats(&owner, seventh.id).await.unwrap();

    assert!(response.task.completed);
    let stamped = response.task.completed_at.expect("completed_at set");
    assert!((stamped - started).num_seconds().abs() <= 1);
    assert_eq!(
        response.completion_stats.completed_tasks,
        before.completed_tasks + 1
    );
    assert_eq!(response.completion_stats.total_tasks, 54);
    assert_eq!(response.completion_stats.completion_percentage, 2);
}

#[tokio::test]
async fn double_toggle_restores_row() {
    let (svc, owner) = seeded().await;
    let all = svc.find_by_owner(&owner, &TaskQuery::default()).await.unwrap();
    let original = all[10].clone();

    svc.toggle_completion(&owner, original.id).await.unwrap();
    let restored = svc.toggle_completion(&owner, original.id).await.unwrap();
    assert_eq!(restored, original);
}

#[tokio::test]
async fn rank_page_from_storage_matches_in_memory_rank() {
    let (svc, owner) = seeded().await;
    let filter = TaskFilter::default();
    let total = usize::try_from(svc.count_tasks(&owner, &filter).await.unwrap()).unwrap();
    let request = PageRequest::new(Some(2), Some(10), &PageLimits::default());

    let from_storage = svc
        .find_by_owner(
            &owner,
            &TaskQuery {
                filter,
                rank_ordered: true,
                limit: Some(request.page_size),
                offset: request.offset(total),
            },
        )
        .await
        .unwrap();

    let stored = svc.find_by_owner(&owner, &TaskQuery::default()).await.unwrap();
    let ranked = sort_tasks_by_priority(&stored, SortOrder::Rank, &ScoringConfig::default(), Utc::now());
    let in_memory = paginate(&ranked, request);

    assert_eq!(
        from_storage.iter().map(|t| t.id).collect::<Vec<_>>(),
        in_memory.items.iter().map(|t| t.task.id).collect::<Vec<_>>()
    );
}
