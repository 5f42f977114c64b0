use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DeleteArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DeleteResponse<'a> {
    id: &'a str,
    deleted: bool,
}

pub async fn handle(
    args: &DeleteArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let deleted = ctx.store.delete(&args.id).await?;
    output(
        &DeleteResponse {
            id: &args.id,
            deleted,
        },
        flags.format,
    )
}
