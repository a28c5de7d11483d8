use deck_core::responses::RegisterResponse;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthRegisterArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    args: &AuthRegisterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let registration = ctx
        .authenticator()
        .register(&args.email, &args.password, args.name.as_deref())
        .await?;
    let response = RegisterResponse {
        id: registration.user.id,
        email: registration.user.email,
        seeded_tasks: registration.seeded_tasks,
    };
    output(&response, flags.format)
}
