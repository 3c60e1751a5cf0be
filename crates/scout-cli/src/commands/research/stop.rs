use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StopResponse<'a> {
    id: &'a str,
    message: String,
}

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let message = ctx
        .backend
        .stop_research(id)
        .await
        .with_context(|| format!("failed to stop research job {id}"))?;
    output(&StopResponse { id, message }, flags.format)
}
