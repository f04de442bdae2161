//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, Write};

use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a serde-serializable payload whose table view is a list of rows.
///
/// - `table`: builds rows with `to_rows` and renders them with `tabled`
/// - `json` / `json-compact` / `yaml`: serializes `data` itself
/// - `plain`: calls `to_ids` for one identifier per line
pub fn render<T, R>(
    format: OutputFormat,
    data: &T,
    to_rows: impl Fn(&T) -> Vec<R>,
    to_ids: impl Fn(&T) -> Vec<String>,
) -> Result<String, CliError>
where
    T: serde::Serialize + ?Sized,
    R: Tabled,
{
    match format {
        OutputFormat::Table => Ok(render_table(&to_rows(data))),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(to_ids(data).join("\n")),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(rendered)
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize)]
    struct Item {
        code: u32,
        name: &'static str,
    }

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Code")]
        code: u32,
        #[tabled(rename = "Name")]
        name: String,
    }

    fn sample() -> Vec<Item> {
        vec![
            Item { code: 7, name: "Cisco 7960" },
            Item { code: 684, name: "Cisco 8851" },
        ]
    }

    fn rows(items: &Vec<Item>) -> Vec<Row> {
        items
            .iter()
            .map(|i| Row {
                code: i.code,
                name: i.name.into(),
            })
            .collect()
    }

    fn ids(items: &Vec<Item>) -> Vec<String> {
        items.iter().map(|i| i.name.to_owned()).collect()
    }

    #[test]
    fn table_has_headers_and_rows() {
        let out = render(OutputFormat::Table, &sample(), rows, ids).expect("renders");
        assert!(out.contains("Code"));
        assert!(out.contains("Cisco 8851"));
    }

    #[test]
    fn compact_json_is_single_line() {
        let out = render(OutputFormat::JsonCompact, &sample(), rows, ids).expect("renders");
        assert_eq!(out, r#"[{"code":7,"name":"Cisco 7960"},{"code":684,"name":"Cisco 8851"}]"#);
    }

    #[test]
    fn plain_is_one_id_per_line() {
        let out = render(OutputFormat::Plain, &sample(), rows, ids).expect("renders");
        assert_eq!(out, "Cisco 7960\nCisco 8851");
    }

    #[test]
    fn yaml_lists_fields() {
        let out = render(OutputFormat::Yaml, &sample(), rows, ids).expect("renders");
        assert!(out.contains("name: Cisco 7960"));
    }
}
