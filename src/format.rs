//! Rendering of comparison results as JSON, Markdown or HTML.

use crate::compare::ComparisonResult;
use crate::error::{DomHashError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    Html,
}

impl OutputFormat {
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Html => "html",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = DomHashError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            _ => Err(DomHashError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Render `result` in the requested format
pub fn format_result(result: &ComparisonResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Markdown => Ok(format_markdown(result)),
        OutputFormat::Html => Ok(format_html(result)),
    }
}

/// Similarity as a percentage with two decimals
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn rows(result: &ComparisonResult) -> Vec<(String, String)> {
    let mut rows = vec![
        ("Hash A".to_string(), result.hash_a.clone()),
        ("Hash B".to_string(), result.hash_b.clone()),
        ("Structural similarity".to_string(), percent(result.similarity)),
    ];
    if let (Some(value), Some(metric)) = (result.shape_similarity, result.shape_metric) {
        rows.push((format!("Shape similarity ({})", metric.label()), percent(value)));
    }
    if let (Some(value), Some(metric)) = (result.layout_similarity, result.layout_metric) {
        rows.push((format!("Layout similarity ({})", metric.label()), percent(value)));
    }
    rows
}

fn format_markdown(result: &ComparisonResult) -> String {
    let mut out = String::from("# DOM Hash Comparison\n\n| Metric | Value |\n| --- | --- |\n");
    for (name, value) in rows(result) {
        out.push_str(&format!("| {} | `{}` |\n", name, value));
    }

    if let Some(diff) = &result.diff {
        out.push_str("\n## Structural Diff\n\n```diff\n");
        for line in diff {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("```\n");
    }
    out
}

fn format_html(result: &ComparisonResult) -> String {
    let mut out = String::from("<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>DOM Hash Comparison</title></head>\n<body>\n<h1>DOM Hash Comparison</h1>\n<table>\n");
    for (name, value) in rows(result) {
        out.push_str(&format!(
            "<tr><th>{}</th><td><code>{}</code></td></tr>\n",
            escape_html(&name),
            escape_html(&value)
        ));
    }
    out.push_str("</table>\n");

    if let Some(diff) = &result.diff {
        out.push_str("<h2>Structural Diff</h2>\n<pre>");
        for line in diff {
            out.push_str(&escape_html(line));
            out.push('\n');
        }
        out.push_str("</pre>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::ShapeMetric;

    fn sample() -> ComparisonResult {
        ComparisonResult {
            hash_a: "aaaa".to_string(),
            hash_b: "bbbb".to_string(),
            similarity: 0.75,
            shape_similarity: Some(0.5),
            shape_metric: Some(ShapeMetric::Lcs),
            layout_similarity: None,
            layout_metric: None,
            diff: Some(vec!["  <div>".to_string(), "- <p></p>".to_string()]),
        }
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert!(matches!("pdf".parse::<OutputFormat>(), Err(DomHashError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_json_output() {
        let json = format_result(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["hashA"], "aaaa");
        assert_eq!(value["shapeSimilarity"], 0.5);
        assert_eq!(value["shapeMetric"], "lcs");
        assert!(value.get("layoutSimilarity").is_none());
    }

    #[test]
    fn test_markdown_output() {
        let md = format_result(&sample(), OutputFormat::Markdown).unwrap();

        assert!(md.contains("| Structural similarity | `75.00%` |"));
        assert!(md.contains("| Shape similarity (LCS) | `50.00%` |"));
        assert!(md.contains("```diff\n  <div>\n- <p></p>\n```"));
    }

    #[test]
    fn test_html_output_escapes_diff() {
        let html = format_result(&sample(), OutputFormat::Html).unwrap();

        assert!(html.contains("<td><code>75.00%</code></td>"));
        assert!(html.contains("- &lt;p&gt;&lt;/p&gt;"));
        assert!(!html.contains("- <p></p>"));
    }
}
