use tracing::{info, warn};

use anyhow::Result;

use crate::cli::InventoryArgs;
use crate::corpus::{build_manifest, load_corpus};
use crate::util::write_json_pretty;

pub fn run(args: InventoryArgs) -> Result<()> {
    let paths = args.corpus.paths();
    let corpus = load_corpus(&paths)?;
    let manifest = build_manifest(&corpus, &args.corpus.data_dir);

    for entry in &manifest.documents {
        if entry.detected_version != entry.version {
            warn!(
                version = entry.version.as_str(),
                detected = entry.detected_version.as_str(),
                path = %entry.path,
                "document markers disagree with its configured version"
            );
        }
    }

    if args.dry_run {
        info!(
            document_count = manifest.document_count,
            data_dir = %manifest.data_directory,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    let manifest_path = args.manifest_path.unwrap_or_else(|| {
        args.corpus
            .data_dir
            .join("manifests")
            .join("bill_inventory.json")
    });

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote inventory manifest");
    info!(document_count = manifest.document_count, "inventory completed");

    Ok(())
}
