use lift_core::exercise_catalog;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ExerciseRow {
    exercise: String,
    entries: usize,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let entries = ctx.store.entries();
    let rows: Vec<ExerciseRow> = exercise_catalog(entries)
        .into_iter()
        .map(|exercise| ExerciseRow {
            entries: entries.iter().filter(|e| e.exercise == exercise).count(),
            exercise,
        })
        .collect();
    output(&rows, flags.format)
}
