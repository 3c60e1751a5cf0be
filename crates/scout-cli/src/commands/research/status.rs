use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let record = ctx
        .backend
        .research_status(id)
        .await
        .with_context(|| format!("failed to fetch status of research job {id}"))?;
    output(&record, flags.format)
}
