use chrono::Utc;

use deck_core::entities::ScoredTask;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = ctx.require_identity()?;
    let task = ctx.service.get_task(&identity.user_id, id).await?;
    let priority_score = ctx.config.scoring.score(&task, Utc::now());
    output(
        &ScoredTask {
            task,
            priority_score,
        },
        flags.format,
    )
}
