use chrono::Utc;

use deck_core::filter::CompletionMap;
use deck_core::pipeline::PageRequest;
use deck_db::repos::tasks::TaskQuery;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskListArgs;
use crate::commands::shared::listing::task_page;
use crate::context::AppContext;
use crate::output::output_task_page;

pub async fn run(args: &TaskListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = ctx.require_identity()?;

    let remembered = ctx.state.filters();
    let mut selection = remembered.with_flags(args.status, args.category, args.priority);
    if let Some(page) = args.page {
        selection = selection.with_page(page);
    }

    let stored = ctx
        .service
        .find_by_owner(&identity.user_id, &TaskQuery::default())
        .await?;
    let completed = CompletionMap::reconcile(&stored, &ctx.state.completion_overrides());
    let request = PageRequest::new(
        Some(selection.page),
        args.page_size,
        &ctx.config.pagination.limits(),
    );
    let response = task_page(
        &stored,
        &completed,
        &selection.filter,
        request,
        args.order.unwrap_or_default(),
        &ctx.config.scoring,
        Utc::now(),
    );

    let viewed = selection.with_page(i64::try_from(response.pagination.page).unwrap_or(1));
    if viewed != remembered {
        ctx.state.save_filters(&viewed)?;
    }

    output_task_page(&response, flags.format)
}
