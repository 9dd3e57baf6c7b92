use std::io::{self, Write};

use anyhow::{Result, bail};
use serde::Serialize;
use tracing::info;

use crate::cli::{CompareArgs, ViewMode};
use crate::corpus::load_corpus;
use crate::diff::{
    DiffRun, DiffStats, RunKind, SideLine, UnifiedLine, diff_lines, summarize, to_side_by_side,
    to_unified,
};
use crate::model::BillVersion;
use crate::normalize::BillTextNormalizer;
use crate::util::truncate_chars;

#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
enum CompareLines {
    SideBySide {
        left: Vec<SideLine>,
        right: Vec<SideLine>,
    },
    Unified {
        lines: Vec<UnifiedLine>,
    },
}

#[derive(Debug, Serialize)]
struct CompareResponse {
    from: BillVersion,
    to: BillVersion,
    normalized: bool,
    stats: DiffStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    lines: Option<CompareLines>,
}

pub fn run(args: CompareArgs) -> Result<()> {
    if args.from == args.to {
        bail!(
            "cannot compare {} with itself; choose two different versions",
            args.from.as_str()
        );
    }

    let corpus = load_corpus(&args.corpus.paths())?;
    let old = &corpus.document(args.from).text;
    let new = &corpus.document(args.to).text;

    let runs = if args.raw {
        diff_lines(old, new)
    } else {
        let normalizer = BillTextNormalizer::new()?;
        diff_lines(
            &normalizer.prepare_for_diff(old),
            &normalizer.prepare_for_diff(new),
        )
    };
    let stats = summarize(&runs);

    info!(
        from = args.from.as_str(),
        to = args.to.as_str(),
        runs = runs.len(),
        additions = stats.additions,
        deletions = stats.deletions,
        unchanged = stats.unchanged,
        "computed line diff"
    );

    if args.json {
        let lines = (!args.stats_only).then(|| match args.view {
            ViewMode::SideBySide => {
                let (left, right) = to_side_by_side(&runs);
                CompareLines::SideBySide { left, right }
            }
            ViewMode::Unified => CompareLines::Unified {
                lines: to_unified(&runs),
            },
        });
        return super::print_json(&CompareResponse {
            from: args.from,
            to: args.to,
            normalized: !args.raw,
            stats,
            lines,
        });
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    writeln!(output, "{} -> {}", args.from.label(), args.to.label())?;
    writeln!(
        output,
        "+{} additions  -{} deletions  {} unchanged",
        stats.additions, stats.deletions, stats.unchanged
    )?;

    if !args.stats_only {
        writeln!(output)?;
        if !stats.has_changes() {
            writeln!(output, "No differences.")?;
        } else {
            let rows = match args.view {
                ViewMode::SideBySide => render_side_by_side(&runs, args.width),
                ViewMode::Unified => render_unified(&runs),
            };
            for row in rows {
                writeln!(output, "{row}")?;
            }
        }
    }
    output.flush()?;

    Ok(())
}

fn render_unified(runs: &[DiffRun]) -> Vec<String> {
    to_unified(runs)
        .into_iter()
        .map(|line| format!("{:>6} | {}", line.marker.to_string(), line.text))
        .collect()
}

fn render_side_by_side(runs: &[DiffRun], width: usize) -> Vec<String> {
    let (left, right) = to_side_by_side(runs);
    left.iter()
        .zip(right.iter())
        .map(|(left, right)| {
            let row = format!(
                "{} {} | {} {}",
                side_marker(left, RunKind::Removed),
                side_cell(left, width),
                side_marker(right, RunKind::Added),
                side_cell(right, width)
            );
            row.trim_end().to_string()
        })
        .collect()
}

fn side_marker(line: &SideLine, changed: RunKind) -> char {
    if !line.placeholder && line.kind == changed {
        if changed == RunKind::Added { '+' } else { '-' }
    } else {
        ' '
    }
}

fn side_cell(line: &SideLine, width: usize) -> String {
    let number = line
        .number
        .map(|number| number.to_string())
        .unwrap_or_default();
    let text = truncate_chars(&line.text, width);
    let padding = width.saturating_sub(text.chars().count());
    format!("{number:>5} {text}{}", " ".repeat(padding))
}
