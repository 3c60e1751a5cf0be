use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::NewsArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `scout news`.
pub async fn handle(args: &NewsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = args.limit.unwrap_or(ctx.config.general.default_news_limit);
    let news = ctx
        .backend
        .news(limit)
        .await
        .context("failed to fetch news")?;
    output(&news, flags.format)
}
