use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `scout weather`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let weather = ctx
        .backend
        .weather()
        .await
        .context("failed to fetch weather")?;
    output(&weather, flags.format)
}
