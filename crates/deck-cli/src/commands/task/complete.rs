use deck_db::updates::task::TaskUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: i64, undo: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = ctx.require_identity()?;
    let update = TaskUpdateBuilder::new().completed(!undo).build();
    let task = ctx.service.update_task(&identity.user_id, id, update).await?;
    super::settle_completion(&ctx.state, id);
    output(&task, flags.format)
}
