use lift_core::Entry;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AddArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AddResponse {
    added: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry: Option<Entry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'static str>,
}

pub async fn handle(args: &AddArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let exercise = args
        .exercise
        .clone()
        .unwrap_or_else(|| ctx.config.general.default_exercise.clone());
    let date = args
        .date
        .clone()
        .unwrap_or_else(|| chrono::Local::now().date_naive().format("%Y-%m-%d").to_string());
    let reps = args.reps.as_deref().unwrap_or("");

    let entry = ctx.store.add(&exercise, &date, &args.weight, reps).await?;
    let response = match entry {
        Some(entry) => AddResponse {
            added: true,
            entry: Some(entry),
            note: None,
        },
        None => AddResponse {
            added: false,
            entry: None,
            note: Some("nothing recorded: exercise and date must be non-blank and weight a number"),
        },
    };
    output(&response, flags.format)
}
