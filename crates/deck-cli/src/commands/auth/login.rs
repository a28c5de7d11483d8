use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthLoginArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthLoginResponse {
    user_id: String,
    email: String,
    expires_at: DateTime<Utc>,
    credentials: String,
}

pub async fn handle(
    args: &AuthLoginArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = ctx.authenticator().login(&args.email, &args.password).await?;
    deck_auth::token_store::store(&session.token)?;
    let identity = ctx.authenticator().resolve(&session.token).await?;

    if deck_auth::token_store::detect_token_source() == Some(deck_auth::TokenSource::Env) {
        tracing::warn!("TASKDECK_AUTH__TOKEN is set and takes precedence over the stored login");
    }

    let response = AuthLoginResponse {
        user_id: identity.user_id.clone(),
        email: identity.email.clone(),
        expires_at: session.expires_at,
        credentials: deck_auth::token_store::credentials_path()?
            .display()
            .to_string(),
    };
    ctx.set_identity(identity);
    output(&response, flags.format)
}
