use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthStatusResponse {
    authenticated: bool,
    user_id: Option<String>,
    email: Option<String>,
    token_source: Option<&'static str>,
    project: String,
    note: Option<String>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let token_source = deck_auth::token_store::detect_token_source().map(|s| s.as_str());
    let project = ctx.project_root.display().to_string();
    let status = match ctx.identity() {
        Some(identity) => AuthStatusResponse {
            authenticated: true,
            user_id: Some(identity.user_id.clone()),
            email: Some(identity.email.clone()),
            token_source,
            project,
            note: None,
        },
        None => AuthStatusResponse {
            authenticated: false,
            user_id: None,
            email: None,
            token_source,
            project,
            note: ctx.require_identity().err().map(|error| error.to_string()),
        },
    };
    output(&status, flags.format)
}
