use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::SearchArgs;
use crate::corpus::load_document;
use crate::model::BillVersion;
use crate::parser::{BillTextParser, Highlight, MIN_QUERY_CHARS, SearchHit, highlight};

#[derive(Debug, Serialize)]
struct VersionHits {
    version: BillVersion,
    label: &'static str,
    total_hits: usize,
    hits: Vec<SearchHit>,
}

#[derive(Debug, Serialize)]
struct SearchResponse<'a> {
    query: &'a str,
    results: Vec<VersionHits>,
}

pub fn run(args: SearchArgs) -> Result<()> {
    let paths = args.corpus.paths();
    let parser = BillTextParser::new()?;
    let versions = match args.bill {
        Some(version) => vec![version],
        None => BillVersion::ALL.to_vec(),
    };

    if args.query.trim().chars().count() < MIN_QUERY_CHARS {
        warn!(query = %args.query, "query too short, nothing to search");
    }

    let mut results = Vec::with_capacity(versions.len());
    for version in versions {
        let document = load_document(version, paths.path_for(version))?;
        let mut hits = parser.search_in_bill(&document.text, &args.query);
        let total_hits = hits.len();
        hits.truncate(args.limit);

        info!(
            version = version.as_str(),
            total_hits,
            shown = hits.len(),
            "searched bill text"
        );

        results.push(VersionHits {
            version,
            label: version.label(),
            total_hits,
            hits,
        });
    }

    if args.json {
        return super::print_json(&SearchResponse {
            query: &args.query,
            results,
        });
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    writeln!(output, "Query: {}", args.query)?;
    for result in &results {
        writeln!(output)?;
        writeln!(
            output,
            "{}: {} hit(s), showing {}",
            result.label,
            result.total_hits,
            result.hits.len()
        )?;
        for hit in &result.hits {
            let marked = mark_matches(&highlight(&hit.text, &args.query)?);
            if hit.section.is_empty() {
                writeln!(output, "  {:>6}  {marked}", hit.line_number)?;
            } else {
                writeln!(output, "  {:>6}  [{}] {marked}", hit.line_number, hit.section)?;
            }
        }
    }
    output.flush()?;

    Ok(())
}

/// Plain-text rendition of highlighted segments: matches wrapped in `[[ ]]`.
fn mark_matches(segments: &[Highlight]) -> String {
    segments
        .iter()
        .map(|segment| {
            if segment.matched {
                format!("[[{}]]", segment.text)
            } else {
                segment.text.clone()
            }
        })
        .collect()
}
