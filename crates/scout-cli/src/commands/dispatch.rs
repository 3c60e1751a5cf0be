use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => commands::run::handle(&args, ctx, flags).await,
        Commands::Research { action } => commands::research::handle(&action, ctx, flags).await,
        Commands::Providers => commands::providers::handle(ctx, flags).await,
        Commands::Weather => commands::weather::handle(ctx, flags).await,
        Commands::News(args) => commands::news::handle(&args, ctx, flags).await,
        Commands::History { action } => commands::history::handle(&action, ctx, flags),
        Commands::Config { action } => commands::config::handle(&action, ctx, flags),
    }
}
