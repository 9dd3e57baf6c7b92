//! Loading of the three bill texts a comparison session works from.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result, anyhow, bail};
use tracing::info;

use crate::model::{BillVersion, CorpusInventoryManifest, DocumentEntry};
use crate::parser::detect_version;
use crate::util::{now_utc_string, sha256_hex};

pub const DEFAULT_DATA_DIR: &str = "data/Bill Text";

impl BillVersion {
    /// File name of this version inside the data directory.
    pub fn default_filename(self) -> &'static str {
        match self {
            Self::Original => "OG Clarity Act.txt",
            Self::Hfsc => {
                "HFSC BILLS-119pih-ANStoHR3633offeredbyChairmanThompsonofPennsylvania-U1.txt"
            }
            Self::Hag => "HAG BILLS-119-HR3633-H001072-Amdt-4.txt",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Original => 0,
            Self::Hfsc => 1,
            Self::Hag => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CorpusPaths {
    pub data_dir: PathBuf,
    paths: [PathBuf; 3],
}

impl CorpusPaths {
    pub fn new(
        data_dir: &Path,
        original: Option<PathBuf>,
        hfsc: Option<PathBuf>,
        hag: Option<PathBuf>,
    ) -> Self {
        let resolve = |version: BillVersion, override_path: Option<PathBuf>| {
            override_path.unwrap_or_else(|| data_dir.join(version.default_filename()))
        };

        Self {
            data_dir: data_dir.to_path_buf(),
            paths: [
                resolve(BillVersion::Original, original),
                resolve(BillVersion::Hfsc, hfsc),
                resolve(BillVersion::Hag, hag),
            ],
        }
    }

    pub fn path_for(&self, version: BillVersion) -> &Path {
        &self.paths[version.index()]
    }
}

#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub version: BillVersion,
    pub path: PathBuf,
    pub text: String,
}

#[derive(Debug)]
pub struct Corpus {
    documents: [LoadedDocument; 3],
}

impl Corpus {
    pub fn document(&self, version: BillVersion) -> &LoadedDocument {
        &self.documents[version.index()]
    }

    pub fn documents(&self) -> &[LoadedDocument] {
        &self.documents
    }
}

/// Read all three versions in parallel. Any failure fails the whole load, so
/// callers never see a partial corpus.
pub fn load_corpus(paths: &CorpusPaths) -> Result<Corpus> {
    let [original, hfsc, hag] = thread::scope(|scope| {
        let handles = BillVersion::ALL.map(|version| {
            let path = paths.path_for(version);
            scope.spawn(move || load_document(version, path))
        });

        handles.map(|handle| {
            handle
                .join()
                .map_err(|_| anyhow!("bill text loader thread panicked"))
                .and_then(|loaded| loaded)
        })
    });

    let documents = [original?, hfsc?, hag?];
    info!(
        data_dir = %paths.data_dir.display(),
        original_bytes = documents[0].text.len(),
        hfsc_bytes = documents[1].text.len(),
        hag_bytes = documents[2].text.len(),
        "loaded bill texts"
    );

    Ok(Corpus { documents })
}

pub fn load_document(version: BillVersion, path: &Path) -> Result<LoadedDocument> {
    let text = fs::read_to_string(path).with_context(|| {
        format!(
            "failed to load {} bill text from {}",
            version.as_str(),
            path.display()
        )
    })?;

    if text.trim().is_empty() {
        bail!(
            "{} bill text at {} is empty",
            version.as_str(),
            path.display()
        );
    }

    Ok(LoadedDocument {
        version,
        path: path.to_path_buf(),
        text,
    })
}

pub fn build_manifest(corpus: &Corpus, data_dir: &Path) -> CorpusInventoryManifest {
    let documents = corpus
        .documents()
        .iter()
        .map(|document| DocumentEntry {
            version: document.version,
            path: document.path.display().to_string(),
            byte_count: document.text.len(),
            line_count: document.text.lines().count(),
            sha256: sha256_hex(document.text.as_bytes()),
            detected_version: detect_version(&document.text),
        })
        .collect::<Vec<DocumentEntry>>();

    CorpusInventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        data_directory: data_dir.display().to_string(),
        document_count: documents.len(),
        documents,
    }
}
