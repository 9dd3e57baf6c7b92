use std::io::{self, Write};

use anyhow::Result;
use tracing::info;

use crate::cli::{NormalizeArgs, NormalizeMode};
use crate::normalize::BillTextNormalizer;

use super::load_selected;

pub fn run(args: NormalizeArgs) -> Result<()> {
    let document = load_selected(&args.document)?;
    let normalizer = BillTextNormalizer::new()?;

    let text = match args.mode {
        NormalizeMode::Clean => normalizer.normalize(&document.text),
        NormalizeMode::Prepare => normalizer.prepare_for_diff(&document.text),
    };

    info!(
        path = %document.path.display(),
        input_lines = document.text.lines().count(),
        output_lines = text.lines().count(),
        "normalized bill text"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    output.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(output)?;
    }
    output.flush()?;

    Ok(())
}
