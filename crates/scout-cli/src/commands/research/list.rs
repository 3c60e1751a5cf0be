use anyhow::Context;
use scout_api::ResearchRecord;
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

/// Compact row for `--format table`; the full records are too wide.
#[derive(Debug, Serialize)]
struct ListRow {
    id: String,
    status: String,
    model: String,
    started: String,
    query: String,
}

impl From<&ResearchRecord> for ListRow {
    fn from(record: &ResearchRecord) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_else(|| String::from("-"));
        Self {
            id: text(&record.id),
            status: String::from(record.status.clone()),
            model: text(&record.model),
            started: text(&record.start_time),
            query: text(&record.query),
        }
    }
}

pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut records = ctx
        .backend
        .list_research()
        .await
        .context("failed to list research jobs")?;
    // Newest first; ISO timestamps sort lexically.
    records.sort_by(|a, b| b.start_time.cmp(&a.start_time));

    match flags.format {
        OutputFormat::Table => {
            let rows = records.iter().map(ListRow::from).collect::<Vec<_>>();
            output(&rows, flags.format)
        }
        OutputFormat::Json | OutputFormat::Raw => output(&records, flags.format),
    }
}

#[cfg(test)]
mod tests {
    use super::ListRow;
    use scout_api::ResearchRecord;

    #[test]
    fn row_fills_missing_fields_with_dash() {
        let record: ResearchRecord =
            serde_json::from_str(r#"{"id": "6f1c", "status": "stopping", "query": "rust"}"#)
                .expect("record should parse");
        let row = ListRow::from(&record);
        assert_eq!(row.status, "stopping");
        assert_eq!(row.model, "-");
        assert_eq!(row.query, "rust");
    }
}
