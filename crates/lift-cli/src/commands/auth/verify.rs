use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthVerifyArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthVerifyResponse {
    authenticated: bool,
    user_id: String,
    email: Option<String>,
    entries: usize,
}

pub async fn handle(
    args: &AuthVerifyArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let identity = ctx
        .require_identity()?
        .complete_sign_in(&args.email, &args.code_or_link)
        .await?;

    // first sign-in pushes local entries, every sign-in pulls the owner's rows
    ctx.apply_identity_changes().await?;

    output(
        &AuthVerifyResponse {
            authenticated: true,
            user_id: identity.user_id,
            email: identity.email,
            entries: ctx.store.entries().len(),
        },
        flags.format,
    )
}
