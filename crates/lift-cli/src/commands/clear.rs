use std::io::{BufRead, IsTerminal, Write};

use anyhow::Context;
use lift_store::Confirmation;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ClearArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ClearResponse {
    cleared: bool,
    removed: usize,
}

pub async fn handle(args: &ClearArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let count = ctx.store.entries().len();
    let confirmation = if args.yes {
        Confirmation::Confirmed
    } else {
        ask(count)?
    };

    let cleared = ctx.store.clear_all(confirmation).await?;
    output(
        &ClearResponse {
            cleared,
            removed: if cleared { count } else { 0 },
        },
        flags.format,
    )
}

/// Prompt on stderr and read one line from stdin. Without a terminal the
/// answer is "no".
fn ask(count: usize) -> anyhow::Result<Confirmation> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        tracing::warn!("not a terminal; pass --yes to clear without a prompt");
        return Ok(Confirmation::Declined);
    }

    let mut stderr = std::io::stderr();
    write!(stderr, "Delete all {count} entries? [y/N] ").context("failed to write prompt")?;
    stderr.flush().context("failed to write prompt")?;

    let mut answer = String::new();
    stdin
        .lock()
        .read_line(&mut answer)
        .context("failed to read answer")?;
    Ok(parse_answer(&answer))
}

fn parse_answer(answer: &str) -> Confirmation {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" | "j" | "ja" => Confirmation::Confirmed,
        _ => Confirmation::Declined,
    }
}
