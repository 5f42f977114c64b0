use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ExportResponse {
    path: PathBuf,
    entries: usize,
}

pub fn handle(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let export = ctx.store.export()?;
    let dir = args.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(&export.file_name);
    std::fs::write(&path, &export.contents)
        .with_context(|| format!("failed to write {}", path.display()))?;

    output(
        &ExportResponse {
            path,
            entries: ctx.store.entries().len(),
        },
        flags.format,
    )
}
