use lift_core::Entry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListArgs;
use crate::context::AppContext;
use crate::output::output;

pub fn handle(args: &ListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let entries: Vec<&Entry> = ctx
        .store
        .entries()
        .iter()
        .filter(|entry| {
            args.exercise
                .as_deref()
                .is_none_or(|exercise| entry.exercise == exercise)
        })
        .collect();
    output(&entries, flags.format)
}
