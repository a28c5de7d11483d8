use std::sync::Arc;

use crate::cli::root_commands::ServeArgs;
use crate::context::AppContext;
use crate::server::{self, ApiState};

/// Handle `deck serve`. Runs until interrupted.
pub async fn handle(args: &ServeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let addr = args
        .addr
        .clone()
        .unwrap_or_else(|| ctx.config.server.addr.clone());
    let state = ApiState::new(Arc::clone(&ctx.service), ctx.config.clone());
    server::run(&addr, state).await
}
