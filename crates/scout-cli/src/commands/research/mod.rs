mod list;
mod report;
mod status;
mod stop;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ResearchCommands;
use crate::context::AppContext;

/// Handle `scout research`.
pub async fn handle(
    action: &ResearchCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ResearchCommands::Status { id } => status::run(id, ctx, flags).await,
        ResearchCommands::Report { id } => report::run(id, ctx, flags).await,
        ResearchCommands::Stop { id } => stop::run(id, ctx, flags).await,
        ResearchCommands::List => list::run(ctx, flags).await,
    }
}
