use chrono::Utc;

use deck_core::entities::NewTask;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCreateArgs;
use crate::commands::shared::parse::parse_deadline;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    args: &TaskCreateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let identity = ctx.require_identity()?;
    let draft = NewTask {
        title: args.title.clone(),
        description: args.description.clone(),
        category: Some(args.category),
        priority: Some(args.priority),
        complexity: args.complexity,
        deadline: parse_deadline(args.deadline.as_deref(), args.due_in_days, Utc::now())?,
        estimated_hours: args.hours,
        dependencies: args.depends_on.clone(),
        tags: args.tags.clone(),
    };
    let task = ctx.service.create_task(&identity.user_id, draft).await?;
    output(&task, flags.format)
}
