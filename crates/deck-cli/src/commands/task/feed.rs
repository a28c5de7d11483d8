//! `deck task feed`: "load more" paging into a bounded window.

use std::future::Future;

use chrono::Utc;

use deck_core::filter::CompletionMap;
use deck_core::pipeline::{LoadCoordinator, PageRequest, WindowBuffer, WindowConfig};
use deck_core::responses::{FeedResponse, TaskListResponse};
use deck_db::repos::tasks::TaskQuery;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::cli::subcommands::TaskFeedArgs;
use crate::commands::shared::listing::task_page;
use crate::context::AppContext;
use crate::output::{output, render_task_rows};

pub async fn run(args: &TaskFeedArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = ctx.require_identity()?;
    let window = ctx.config.pagination.window()?;
    let page_size = PageRequest::new(None, args.page_size, &ctx.config.pagination.limits()).page_size;
    let filter = ctx.state.filters().filter;
    let order = args.order.unwrap_or_default();

    let fetch = move |request: PageRequest| async move {
        let stored = ctx
            .service
            .find_by_owner(&identity.user_id, &TaskQuery::default())
            .await?;
        let completed = CompletionMap::reconcile(&stored, &ctx.state.completion_overrides());
        Ok::<_, anyhow::Error>(task_page(
            &stored,
            &completed,
            &filter,
            request,
            order,
            &ctx.config.scoring,
            Utc::now(),
        ))
    };

    let coordinator = LoadCoordinator::new();
    let feed = load_window(args.pages, page_size, window, &coordinator, fetch).await?;

    if flags.format == OutputFormat::Table {
        println!(
            "{}\nloaded {} page(s), window starts at #{}, {} trimmed{}",
            render_task_rows(&feed.items),
            feed.pages_loaded,
            feed.offset + 1,
            feed.trimmed,
            if feed.exhausted { ", end of list" } else { "" }
        );
        return Ok(());
    }
    output(&feed, flags.format)
}

/// Issue up to `steps` load-more triggers, appending each fetched page to a
/// window buffer. Triggers that arrive while a load is in flight are dropped
/// and stale results are discarded.
pub(crate) async fn load_window<F, Fut>(
    steps: usize,
    page_size: usize,
    window: WindowConfig,
    coordinator: &LoadCoordinator,
    mut fetch: F,
) -> anyhow::Result<FeedResponse>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = anyhow::Result<TaskListResponse>>,
{
    let mut buffer = WindowBuffer::new(window);
    let mut trimmed = 0;
    let mut pages_loaded = 0;
    let mut has_more = true;

    for _ in 0..steps {
        if !has_more || buffer.is_exhausted() {
            break;
        }
        let Some(ticket) = coordinator.begin() else {
            tracing::debug!("load already in flight; trigger ignored");
            continue;
        };
        let request = PageRequest {
            page: buffer.next_page(),
            page_size,
        };
        let response = fetch(request).await?;
        let Some(response) = ticket.complete(response) else {
            tracing::debug!(page = request.page, "discarding stale page");
            continue;
        };

        has_more = response.pagination.has_more;
        let outcome = buffer.append(response.items, page_size);
        if outcome.trimmed > 0 {
            tracing::debug!(trimmed = outcome.trimmed, "window trimmed");
        }
        trimmed += outcome.trimmed;
        pages_loaded += 1;
    }
    coordinator.close();

    Ok(FeedResponse {
        items: buffer.items().to_vec(),
        offset: buffer.offset(),
        pages_loaded,
        trimmed,
        exhausted: !has_more || buffer.is_exhausted(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use deck_core::entities::{ScoredTask, Task};
    use deck_core::enums::{Category, Priority};
    use deck_core::pipeline::paginate;
    use pretty_assertions::assert_eq;

    fn scored(count: usize) -> Vec<ScoredTask> {
        let now = Utc::now();
        (0..count)
            .map(|i| {
                let id = i64::try_from(i).unwrap();
                ScoredTask {
                    task: Task {
                        id,
                        user_id: "usr-feed".into(),
                        title: format!("task {id}"),
                        description: None,
                        category: Category::Testing,
                        priority: Priority::Medium,
                        complexity: None,
                        deadline: None,
                        estimated_hours: None,
                        dependencies: vec![],
                        tags: vec![],
                        completed: false,
                        completed_at: None,
                        created_at: now - Duration::minutes(id),
                    },
                    priority_score: 56.0,
                }
            })
            .collect()
    }

    fn source(
        items: &[ScoredTask],
    ) -> impl FnMut(PageRequest) -> std::future::Ready<anyhow::Result<TaskListResponse>> + '_ {
        move |request| std::future::ready(Ok(paginate(items, request).into()))
    }

    #[tokio::test]
    async fn thirteen_pages_trim_to_most_recent_hundred() {
        let items = scored(162);
        let coordinator = LoadCoordinator::new();
        let feed = load_window(13, 10, WindowConfig::default(), &coordinator, source(&items))
            .await
            .unwrap();

        assert_eq!(feed.pages_loaded, 13);
        assert_eq!(feed.items.len(), 100);
        assert_eq!(feed.trimmed, 30);
        assert_eq!(feed.offset, 30);
        assert_eq!(feed.items[0].task.id, 30);
        assert_eq!(feed.items[99].task.id, 129);
        assert!(!feed.exhausted);
    }

    #[tokio::test]
    async fn stops_at_the_last_page() {
        let items = scored(25);
        let coordinator = LoadCoordinator::new();
        let feed = load_window(10, 10, WindowConfig::default(), &coordinator, source(&items))
            .await
            .unwrap();

        assert_eq!(feed.pages_loaded, 3);
        assert_eq!(feed.items.len(), 25);
        assert!(feed.exhausted);
    }

    #[tokio::test]
    async fn full_last_page_does_not_repeat() {
        let items = scored(20);
        let coordinator = LoadCoordinator::new();
        let feed = load_window(5, 10, WindowConfig::default(), &coordinator, source(&items))
            .await
            .unwrap();

        assert_eq!(feed.pages_loaded, 2);
        assert_eq!(feed.items.len(), 20);
        assert!(feed.exhausted);
    }

    #[tokio::test]
    async fn closed_view_loads_nothing() {
        let items = scored(30);
        let coordinator = LoadCoordinator::new();
        coordinator.close();
        let feed = load_window(3, 10, WindowConfig::default(), &coordinator, source(&items))
            .await
            .unwrap();

        assert_eq!(feed.pages_loaded, 0);
        assert!(feed.items.is_empty());
    }

    #[tokio::test]
    async fn trigger_during_in_flight_load_is_ignored() {
        let items = scored(30);
        let coordinator = LoadCoordinator::new();
        let held = coordinator.begin().expect("first load starts");
        let feed = load_window(3, 10, WindowConfig::default(), &coordinator, source(&items))
            .await
            .unwrap();
        drop(held);

        assert_eq!(feed.pages_loaded, 0);
    }

    #[tokio::test]
    async fn fetch_error_propagates() {
        let coordinator = LoadCoordinator::new();
        let result = load_window(2, 10, WindowConfig::default(), &coordinator, |_| async {
            Err::<TaskListResponse, _>(anyhow::anyhow!("store offline"))
        })
        .await;
        assert!(result.unwrap_err().to_string().contains("store offline"));
        assert!(!coordinator.is_in_flight());
    }
}
