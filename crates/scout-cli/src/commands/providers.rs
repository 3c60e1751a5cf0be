use std::collections::BTreeMap;

use scout_core::{ProviderInfo, builtin_catalog, is_research_capable};
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

/// One model per row for `--format table`.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct ModelRow {
    provider: String,
    model: String,
    name: String,
    research: bool,
    key_env: String,
}

/// Handle `scout providers`.
///
/// Falls back to the built-in catalog when the backend listing fails.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalog = match ctx.backend.providers().await {
        Ok(catalog) if !catalog.is_empty() => catalog,
        Ok(_) => builtin_catalog(),
        Err(error) => {
            tracing::warn!(%error, "provider listing unavailable; using built-in catalog");
            builtin_catalog()
        }
    };

    match flags.format {
        OutputFormat::Table => output(&model_rows(&catalog), flags.format),
        OutputFormat::Json | OutputFormat::Raw => output(&catalog, flags.format),
    }
}

fn model_rows(catalog: &BTreeMap<String, ProviderInfo>) -> Vec<ModelRow> {
    catalog
        .iter()
        .flat_map(|(provider, info)| {
            info.models.iter().map(move |model| ModelRow {
                provider: provider.clone(),
                model: model.id.clone(),
                name: model.name.clone(),
                research: is_research_capable(&model.id),
                key_env: info.key_env.clone(),
            })
        })
        .collect()
}
