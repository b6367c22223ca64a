use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Bootstrap => commands::bootstrap::handle(ctx, flags).await,
        Commands::Directory { action } => commands::directory::handle(&action, ctx, flags).await,
        Commands::Refresh(args) => commands::refresh::handle(&args, ctx, flags).await,
        Commands::Notify(args) => commands::notify::handle(&args, ctx, flags).await,
        Commands::Snapshot(args) => commands::snapshot::handle(&args, ctx, flags).await,
        Commands::Scrapers => commands::scrapers::handle(ctx, flags),
        Commands::Cycle => commands::cycle::handle(ctx, flags).await,
        Commands::Schema => unreachable!("schema is pre-dispatched in main"),
    }
}
