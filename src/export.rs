//! Standalone comparison reports.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::diff::{DiffRun, DiffStats, RunKind, diff_lines, line_records, summarize};
use crate::normalize::BillTextNormalizer;
use crate::util::utc_compact_string;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Self-contained HTML page with inline styles.
    Html,
    /// Markdown document with a fenced diff block.
    Markdown,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Markdown => "markdown",
        }
    }

    /// Recommended file extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Markdown => "md",
        }
    }
}

/// Runtime options controlling export behavior.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_line_numbers: bool,
    /// Run both texts through `prepare_for_diff` before diffing.
    pub normalize: bool,
    /// Human-readable generation date printed in the report header.
    pub generated_on: String,
}

pub struct BillExporter {
    normalizer: BillTextNormalizer,
}

impl BillExporter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            normalizer: BillTextNormalizer::new()?,
        })
    }

    pub fn export_comparison(
        &self,
        text_a: &str,
        text_b: &str,
        label_a: &str,
        label_b: &str,
        options: &ExportOptions,
    ) -> String {
        let runs = if options.normalize {
            diff_lines(
                &self.normalizer.prepare_for_diff(text_a),
                &self.normalizer.prepare_for_diff(text_b),
            )
        } else {
            diff_lines(text_a, text_b)
        };
        let stats = summarize(&runs);

        match options.format {
            ExportFormat::Html => render_html(&runs, &stats, label_a, label_b, options),
            ExportFormat::Markdown => render_markdown(&runs, &stats, label_a, label_b, options),
        }
    }
}

/// `bill-comparison-<a>-vs-<b>-<timestamp>.<ext>`
pub fn export_filename(
    version_a: &str,
    version_b: &str,
    format: ExportFormat,
    ts: DateTime<Utc>,
) -> String {
    format!(
        "bill-comparison-{}-vs-{}-{}.{}",
        version_a,
        version_b,
        utc_compact_string(ts),
        format.extension()
    )
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

const HTML_STYLE: &str = r#"    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      line-height: 1.6;
      max-width: 1200px;
      margin: 0 auto;
      padding: 20px;
      background: #f5f5f5;
    }
    .header { background: #1e293b; color: white; padding: 20px; border-radius: 8px; margin-bottom: 20px; }
    .comparison-container { background: white; border-radius: 8px; padding: 20px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
    .stats { display: flex; gap: 20px; margin-bottom: 20px; padding: 15px; background: #f8fafc; border-radius: 6px; }
    .additions { color: #10b981; font-weight: 600; }
    .deletions { color: #ef4444; font-weight: 600; }
    .unchanged { color: #6b7280; }
    .diff-line { font-family: 'Monaco', 'Consolas', monospace; font-size: 14px; line-height: 1.5; padding: 2px 0; white-space: pre-wrap; }
    .line-number { display: inline-block; width: 50px; text-align: right; padding-right: 10px; color: #9ca3af; user-select: none; }
    .added { background-color: #d1fae5; color: #065f46; }
    .removed { background-color: #fee2e2; color: #991b1b; }
    @media print {
      body { background: white; }
      .header { color: black; border: 1px solid #000; }
    }
"#;

fn render_html(
    runs: &[DiffRun],
    stats: &DiffStats,
    label_a: &str,
    label_b: &str,
    options: &ExportOptions,
) -> String {
    let label_a = escape_html(label_a);
    let label_b = escape_html(label_b);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n");
    html.push_str(&format!(
        "  <title>Bill Comparison: {label_a} vs {label_b}</title>\n"
    ));
    html.push_str("  <style>\n");
    html.push_str(HTML_STYLE);
    html.push_str("  </style>\n</head>\n<body>\n");
    html.push_str("  <div class=\"header\">\n    <h1>Legislative Text Comparison</h1>\n");
    html.push_str(&format!("    <p>{label_a} &rarr; {label_b}</p>\n"));
    html.push_str(&format!(
        "    <p>Generated on {}</p>\n  </div>\n",
        escape_html(&options.generated_on)
    ));

    html.push_str("  <div class=\"comparison-container\">\n    <div class=\"stats\">\n");
    html.push_str(&format!(
        "      <div class=\"stat additions\">+{} additions</div>\n",
        stats.additions
    ));
    html.push_str(&format!(
        "      <div class=\"stat deletions\">-{} deletions</div>\n",
        stats.deletions
    ));
    html.push_str(&format!(
        "      <div class=\"stat unchanged\">{} unchanged</div>\n",
        stats.unchanged
    ));
    html.push_str("    </div>\n    <div class=\"diff-content\">\n");

    let mut line_number = 1usize;
    for (kind, line) in line_records(runs) {
        let (class_name, prefix) = match kind {
            RunKind::Added => ("diff-line added", "+ "),
            RunKind::Removed => ("diff-line removed", "- "),
            RunKind::Unchanged => ("diff-line", "  "),
        };

        html.push_str(&format!("      <div class=\"{class_name}\">"));
        if options.include_line_numbers {
            if kind == RunKind::Removed {
                html.push_str("<span class=\"line-number\"></span>");
            } else {
                html.push_str(&format!("<span class=\"line-number\">{line_number}</span>"));
                line_number += 1;
            }
        }
        html.push_str(prefix);
        html.push_str(&escape_html(line));
        html.push_str("</div>\n");
    }

    html.push_str("    </div>\n  </div>\n</body>\n</html>\n");
    html
}

/// Backtick fence one longer than the longest backtick run in `lines`, and
/// never shorter than three.
fn code_fence<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    let longest = lines
        .flat_map(|line| line.split(|character| character != '`'))
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

fn render_markdown(
    runs: &[DiffRun],
    stats: &DiffStats,
    label_a: &str,
    label_b: &str,
    options: &ExportOptions,
) -> String {
    let mut markdown = String::from("# Legislative Text Comparison\n\n");
    markdown.push_str(&format!("**{label_a}** → **{label_b}**  \n"));
    markdown.push_str(&format!("Generated on {}\n\n", options.generated_on));

    markdown.push_str("## Summary\n\n");
    markdown.push_str(&format!("- **Additions:** +{} lines\n", stats.additions));
    markdown.push_str(&format!("- **Deletions:** -{} lines\n", stats.deletions));
    markdown.push_str(&format!("- **Unchanged:** {} lines\n\n", stats.unchanged));

    let records = line_records(runs);
    let fence = code_fence(records.iter().map(|(_, line)| *line));
    markdown.push_str(&format!("## Differences\n\n{fence}diff\n"));

    let mut line_number = 1usize;
    for (kind, line) in records {
        let prefix = match kind {
            RunKind::Added => "+ ",
            RunKind::Removed => "- ",
            RunKind::Unchanged => "  ",
        };

        markdown.push_str(prefix);
        if options.include_line_numbers {
            if kind == RunKind::Removed {
                markdown.push_str("      | ");
            } else {
                markdown.push_str(&format!("{line_number:>5} | "));
                line_number += 1;
            }
        }
        markdown.push_str(line);
        markdown.push('\n');
    }

    markdown.push_str(&fence);
    markdown.push('\n');
    markdown
}
