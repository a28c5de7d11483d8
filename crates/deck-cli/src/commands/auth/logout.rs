use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthLogoutResponse {
    session_ended: bool,
    cleared: bool,
}

pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session_ended = match deck_auth::token_store::load() {
        Some(token) => match ctx.authenticator().logout(&token).await {
            Ok(ended) => ended,
            Err(error) => {
                tracing::warn!(%error, "failed to end server-side session");
                false
            }
        },
        None => false,
    };
    deck_auth::logout()?;
    ctx.clear_identity();
    output(
        &AuthLogoutResponse {
            session_ended,
            cleared: true,
        },
        flags.format,
    )
}
