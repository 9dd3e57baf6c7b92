use anyhow::{Result, bail};
use chrono::Utc;
use tracing::info;

use crate::cli::ExportArgs;
use crate::corpus::load_corpus;
use crate::export::{BillExporter, ExportOptions, export_filename};
use crate::util::write_text_file;

pub fn run(args: ExportArgs) -> Result<()> {
    if args.from == args.to {
        bail!(
            "cannot export a comparison of {} with itself",
            args.from.as_str()
        );
    }

    let corpus = load_corpus(&args.corpus.paths())?;
    let exporter = BillExporter::new()?;
    let now = Utc::now();

    let options = ExportOptions {
        format: args.format,
        include_line_numbers: !args.no_line_numbers,
        normalize: !args.raw,
        generated_on: now.format("%B %-d, %Y").to_string(),
    };

    let report = exporter.export_comparison(
        &corpus.document(args.from).text,
        &corpus.document(args.to).text,
        args.from.label(),
        args.to.label(),
        &options,
    );

    let path = args.output_dir.join(export_filename(
        args.from.as_str(),
        args.to.as_str(),
        args.format,
        now,
    ));
    write_text_file(&path, &report)?;

    info!(
        path = %path.display(),
        format = args.format.as_str(),
        bytes = report.len(),
        "wrote comparison report"
    );

    Ok(())
}
