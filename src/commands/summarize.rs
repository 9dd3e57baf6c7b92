use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::SummarizeArgs;
use crate::parser::BillTextParser;
use crate::summary::{CommandBackend, SummaryOutcome, SummaryRequest, request_summary};

use super::{load_selected, print_json, require_section};

#[derive(Debug, Serialize)]
struct SummaryResponse<'a> {
    subject: &'a str,
    truncated: bool,
    outcome: SummaryOutcome,
}

pub fn run(args: SummarizeArgs) -> Result<()> {
    let document = load_selected(&args.document)?;

    let request = match args.section.as_deref() {
        Some(number) => {
            let parsed = BillTextParser::new()?.parse(&document.text);
            SummaryRequest::for_section(require_section(&parsed, number)?)
        }
        None => SummaryRequest::for_document(args.document.bill.label(), &document.text),
    };

    if args.prompt_only {
        if args.json {
            return print_json(&request);
        }
        let mut output = io::BufWriter::new(io::stdout().lock());
        writeln!(output, "{}", request.prompt)?;
        output.flush()?;
        return Ok(());
    }

    let command = args
        .command
        .as_deref()
        .context("no summarizer configured; pass --command or set BILLDIFF_SUMMARIZER")?;
    let backend = CommandBackend::from_command_line(command)?;
    let outcome = request_summary(&backend, &request);

    if args.json {
        return print_json(&SummaryResponse {
            subject: &request.subject,
            truncated: request.truncated,
            outcome,
        });
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    writeln!(output, "Summary of {}", request.subject)?;
    writeln!(output)?;
    match outcome {
        SummaryOutcome::Summary(text) => writeln!(output, "{text}")?,
        SummaryOutcome::Failed(message) => writeln!(output, "[summary unavailable] {message}")?,
    }
    output.flush()?;

    Ok(())
}
