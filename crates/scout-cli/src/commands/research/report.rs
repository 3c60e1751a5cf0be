use anyhow::Context;
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ReportResponse<'a> {
    id: &'a str,
    report: Option<String>,
}

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = ctx
        .backend
        .research_report(id)
        .await
        .with_context(|| format!("failed to fetch report of research job {id}"))?;

    match flags.format {
        OutputFormat::Json => output(&ReportResponse { id, report }, flags.format),
        OutputFormat::Table | OutputFormat::Raw => {
            let report =
                report.with_context(|| format!("research job {id} has no report"))?;
            println!("{report}");
            Ok(())
        }
    }
}
