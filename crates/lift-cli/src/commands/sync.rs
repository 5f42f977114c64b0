use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct SyncResponse {
    synced: bool,
    entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'static str>,
}

pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let synced = ctx.store.refresh().await?;
    output(
        &SyncResponse {
            synced,
            entries: ctx.store.entries().len(),
            note: (!synced).then_some("not signed in; entries are local only"),
        },
        flags.format,
    )
}
