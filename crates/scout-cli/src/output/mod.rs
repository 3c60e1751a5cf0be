use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(&serde_json::to_value(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

fn render_table(value: &Value) -> anyhow::Result<String> {
    let width = ui::prefs().term_width;
    let out = match value {
        Value::Array(items) if items.is_empty() => String::from("(no rows)"),
        Value::Array(items) if items.iter().all(Value::is_object) => {
            let mut headers: Vec<&str> = Vec::new();
            for key in items.iter().filter_map(Value::as_object).flat_map(|m| m.keys()) {
                if !headers.contains(&key.as_str()) {
                    headers.push(key.as_str());
                }
            }
            let rows = items
                .iter()
                .filter_map(Value::as_object)
                .map(|map| {
                    headers
                        .iter()
                        .map(|h| map.get(*h).map_or_else(|| String::from("-"), cell))
                        .collect()
                })
                .collect::<Vec<_>>();
            table::render(&headers, &rows, width)
        }
        Value::Array(items) => {
            let rows = items.iter().map(|v| vec![cell(v)]).collect::<Vec<_>>();
            table::render(&["value"], &rows, width)
        }
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect::<Vec<_>>();
            table::render(&["key", "value"], &rows, width)
        }
        scalar => cell(scalar),
    };
    Ok(out)
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Row {
        id: &'static str,
        status: &'static str,
        error: Option<&'static str>,
    }

    #[test]
    fn json_render_is_pretty() {
        let out = render(
            &Row {
                id: "x",
                status: "running",
                error: None,
            },
            OutputFormat::Json,
        )
        .expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["status"], "running");
        assert!(out.contains('\n'));
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&vec![1, 2, 3], OutputFormat::Raw).expect("raw render should work");
        assert_eq!(out, "[1,2,3]");
    }

    #[test]
    fn table_render_collects_columns_and_marks_nulls() {
        let rows = vec![
            Row {
                id: "a",
                status: "error",
                error: Some("boom"),
            },
            Row {
                id: "b",
                status: "running",
                error: None,
            },
        ];
        let out = render(&rows, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("header");
        for column in ["id", "status", "error"] {
            assert!(header.contains(column), "{header}");
        }
        // Columns are alphabetical, so the null `error` cell leads the row.
        assert!(out.lines().nth(3).is_some_and(|l| l.starts_with('-')));
    }

    #[test]
    fn table_render_of_empty_list() {
        let rows: Vec<Row> = Vec::new();
        assert_eq!(
            render(&rows, OutputFormat::Table).expect("render"),
            "(no rows)"
        );
    }
}
