use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    signed_out: bool,
    local_entries: usize,
}

pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_identity()?.sign_out().await?;
    ctx.apply_identity_changes().await?;

    output(
        &AuthLogoutResponse {
            signed_out: true,
            local_entries: ctx.store.entries().len(),
        },
        flags.format,
    )
}
