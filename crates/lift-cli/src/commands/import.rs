use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ImportResponse {
    imported: usize,
}

pub async fn handle(
    args: &ImportArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let imported = ctx
        .store
        .import(&contents)
        .await
        .with_context(|| format!("import of {} failed", args.file.display()))?;
    output(&ImportResponse { imported }, flags.format)
}
