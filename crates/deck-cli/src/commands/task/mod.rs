mod complete;
mod create;
mod feed;
mod get;
mod list;
mod stats;
mod toggle;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::context::AppContext;
use crate::state::StateStore;

/// Handle `deck task <subcommand>`.
pub async fn handle(
    action: &TaskCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TaskCommands::List(args) => list::run(args, ctx, flags).await,
        TaskCommands::Create(args) => create::run(args, ctx, flags).await,
        TaskCommands::Get { id } => get::run(*id, ctx, flags).await,
        TaskCommands::Toggle { id } => toggle::run(*id, ctx, flags).await,
        TaskCommands::Complete { id, undo } => complete::run(*id, *undo, ctx, flags).await,
        TaskCommands::Stats => stats::run(ctx, flags).await,
        TaskCommands::Feed(args) => feed::run(args, ctx, flags).await,
    }
}

/// Storage confirmed a completion change for `id`, so any local override for
/// it is stale. Later listings follow storage, including changes made
/// through `deck serve`.
fn settle_completion(state: &StateStore, id: i64) {
    match state.forget_completion_override(id) {
        Ok(true) => tracing::debug!(task_id = id, "dropped settled completion override"),
        Ok(false) => {}
        Err(error) => tracing::warn!(%error, task_id = id, "failed to drop completion override"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::entities::NewTask;
    use deck_core::enums::{Category, Priority};
    use deck_core::filter::CompletionMap;
    use deck_db::DeckService;
    use deck_db::repos::tasks::TaskQuery;

    #[tokio::test]
    async fn confirmed_toggle_lets_later_storage_changes_show() {
        let dir = tempfile::tempdir().unwrap();
        let state = StateStore::new(dir.path().join("state"));
        let svc = DeckService::new_local(":memory:").await.unwrap();
        let owner = svc
            .register_with_catalogue("cli@example.com", None, "hash", &[])
            .await
            .unwrap()
            .user
            .id;
        let task = svc
            .create_task(
                &owner,
                NewTask {
                    title: "Ship it".into(),
                    category: Some(Category::Backend),
                    priority: Some(Priority::High),
                    ..NewTask::default()
                },
            )
            .await
            .unwrap();

        let mut overrides = CompletionMap::new();
        overrides.set(task.id, true);
        state.save_completion_overrides(&overrides).unwrap();

        // CLI toggle, then the same task toggled back through the API.
        svc.toggle_with_stats(&owner, task.id).await.unwrap();
        settle_completion(&state, task.id);
        let stats = svc.toggle_with_stats(&owner, task.id).await.unwrap();

        let stored = svc.find_by_owner(&owner, &TaskQuery::default()).await.unwrap();
        let view = CompletionMap::reconcile(&stored, &state.completion_overrides());
        assert!(!stored[0].completed);
        assert!(!view.is_completed(task.id));
        assert_eq!(stats.completion_stats.completed_tasks, 0);
    }
}
