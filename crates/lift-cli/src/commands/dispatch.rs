use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
///
/// Entry commands run after the start-of-run reconciliation; auth commands
/// manage the session themselves.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if let Commands::Auth { action } = &command {
        return commands::auth::handle(action, ctx, flags).await;
    }

    ctx.connect().await?;

    match command {
        Commands::Add(args) => commands::add::handle(&args, ctx, flags).await,
        Commands::List(args) => commands::list::handle(&args, ctx, flags),
        Commands::Delete(args) => commands::delete::handle(&args, ctx, flags).await,
        Commands::Clear(args) => commands::clear::handle(&args, ctx, flags).await,
        Commands::Import(args) => commands::import::handle(&args, ctx, flags).await,
        Commands::Export(args) => commands::export::handle(&args, ctx, flags),
        Commands::Chart(args) => commands::chart::handle(&args, ctx, flags),
        Commands::Exercises => commands::exercises::handle(ctx, flags),
        Commands::Sync => commands::sync::handle(ctx, flags).await,
        Commands::Auth { .. } => unreachable!("auth is dispatched above"),
    }
}
