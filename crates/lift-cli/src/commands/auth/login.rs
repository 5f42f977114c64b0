use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    sent: bool,
    email: String,
    next: String,
}

pub async fn handle(
    args: &AuthLoginArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let email = args.email.trim();
    ctx.require_identity()?.request_link(email).await?;

    output(
        &AuthLoginResponse {
            sent: true,
            email: email.to_string(),
            next: format!("liftlog auth verify {email} <code-or-link>"),
        },
        flags.format,
    )
}
