use lift_core::{ExerciseSummary, SeriesPoint, exercise_summary, filtered_series};
use serde::Serialize;

use crate::cli::root_commands::ChartArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::{chart, output};

#[derive(Serialize)]
struct ChartResponse<'a> {
    exercise: &'a str,
    summary: Option<ExerciseSummary>,
    points: Vec<SeriesPoint<'a>>,
}

pub fn handle(args: &ChartArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let exercise = args
        .exercise
        .as_deref()
        .unwrap_or(&ctx.config.general.default_exercise);
    let entries = ctx.store.entries();
    let series = filtered_series(entries, exercise);
    let summary = exercise_summary(entries, exercise);

    if flags.format == OutputFormat::Table {
        match &summary {
            Some(summary) => {
                println!("{}", chart::render_heading(summary));
                println!("{}", chart::render_bars(&series, ctx.config.general.chart_width));
            }
            None => println!("no entries for {exercise}"),
        }
        return Ok(());
    }

    output(
        &ChartResponse {
            exercise,
            summary,
            points: series.collect(),
        },
        flags.format,
    )
}
