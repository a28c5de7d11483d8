use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = ctx.require_identity()?;
    let response = ctx.service.toggle_with_stats(&identity.user_id, id).await?;
    super::settle_completion(&ctx.state, id);
    output(&response, flags.format)
}
