pub mod citations;
pub mod compare;
pub mod export;
pub mod inventory;
pub mod normalize;
pub mod search;
pub mod sections;
pub mod summarize;

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::DocumentArgs;
use crate::corpus::{LoadedDocument, load_document};
use crate::model::{BillSection, ParsedBill};

/// Load the one document a single-bill command works on: `--input` when
/// given, the selected corpus version otherwise.
pub(crate) fn load_selected(args: &DocumentArgs) -> Result<LoadedDocument> {
    match &args.input {
        Some(path) => load_document(args.bill, path),
        None => {
            let paths = args.corpus.paths();
            load_document(args.bill, paths.path_for(args.bill))
        }
    }
}

pub(crate) fn require_section<'a>(parsed: &'a ParsedBill, number: &str) -> Result<&'a BillSection> {
    parsed.find_section(number).with_context(|| {
        format!(
            "section '{number}' not found in {}",
            parsed.version.label()
        )
    })
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, value).context("failed to serialize json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}
