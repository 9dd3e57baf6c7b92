use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::cli::CitationsArgs;
use crate::parser::BillTextParser;

use super::{load_selected, print_json, require_section};

#[derive(Debug, Serialize)]
struct CitationsResponse {
    scope: String,
    citation_count: usize,
    citations: Vec<String>,
}

pub fn run(args: CitationsArgs) -> Result<()> {
    let document = load_selected(&args.document)?;
    let parser = BillTextParser::new()?;

    let response = match args.section.as_deref() {
        Some(number) => {
            let parsed = parser.parse(&document.text);
            let section = require_section(&parsed, number)?;
            CitationsResponse {
                scope: section.section_number.clone(),
                citation_count: section.citations.len(),
                citations: section.citations.clone(),
            }
        }
        None => {
            let citations = parser.citations().extract(&document.text);
            CitationsResponse {
                scope: args.document.bill.label().to_string(),
                citation_count: citations.len(),
                citations,
            }
        }
    };

    info!(
        scope = %response.scope,
        citation_count = response.citation_count,
        "extracted citations"
    );

    if args.json {
        return print_json(&response);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    writeln!(output, "Citations in {}: {}", response.scope, response.citation_count)?;
    for citation in &response.citations {
        writeln!(output, "\t{citation}")?;
    }
    output.flush()?;

    Ok(())
}
