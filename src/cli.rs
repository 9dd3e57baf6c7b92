use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::corpus::{CorpusPaths, DEFAULT_DATA_DIR};
use crate::export::ExportFormat;
use crate::model::BillVersion;

#[derive(Parser, Debug)]
#[command(
    name = "billdiff",
    version,
    about = "Compare a legislative bill against its committee amendments"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load all three bill texts and record their provenance.
    Inventory(InventoryArgs),
    /// Print a bill text after artifact removal.
    Normalize(NormalizeArgs),
    /// Print the TITLE/SECTION outline of a bill.
    Sections(SectionsArgs),
    /// List statutory citations in a bill or one of its sections.
    Citations(CitationsArgs),
    /// Search bill text, attributing hits to their section.
    Search(SearchArgs),
    /// Line diff between two bill versions.
    Compare(CompareArgs),
    /// Write a standalone HTML or Markdown comparison report.
    Export(ExportArgs),
    /// Summarize a bill or section through an external generator.
    Summarize(SummarizeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Override the path of the original bill text.
    #[arg(long)]
    pub original: Option<PathBuf>,

    /// Override the path of the HFSC amendment text.
    #[arg(long)]
    pub hfsc: Option<PathBuf>,

    /// Override the path of the HAG amendment text.
    #[arg(long)]
    pub hag: Option<PathBuf>,
}

impl CorpusArgs {
    pub fn paths(&self) -> CorpusPaths {
        CorpusPaths::new(
            &self.data_dir,
            self.original.clone(),
            self.hfsc.clone(),
            self.hag.clone(),
        )
    }
}

#[derive(Args, Debug, Clone)]
pub struct DocumentArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    #[arg(long, value_enum, default_value_t = BillVersion::Original)]
    pub bill: BillVersion,

    /// Read an arbitrary text file instead of a corpus document.
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum NormalizeMode {
    /// Artifact and whitespace cleanup only.
    Clean,
    /// Cleanup plus cropping to the substantive body, as used for diffing.
    Prepare,
}

#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    #[arg(long, value_enum, default_value_t = NormalizeMode::Prepare)]
    pub mode: NormalizeMode,
}

#[derive(Args, Debug, Clone)]
pub struct SectionsArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Show one section (e.g. "SEC. 103" or "TITLE II") with its content.
    #[arg(long)]
    pub section: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CitationsArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    #[arg(long)]
    pub section: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    #[arg(long)]
    pub query: String,

    /// Restrict the search to one version; all three are searched otherwise.
    #[arg(long, value_enum)]
    pub bill: Option<BillVersion>,

    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ViewMode {
    SideBySide,
    Unified,
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    #[arg(long, value_enum, default_value_t = BillVersion::Original)]
    pub from: BillVersion,

    #[arg(long, value_enum, default_value_t = BillVersion::Hfsc)]
    pub to: BillVersion,

    #[arg(long, value_enum, default_value_t = ViewMode::Unified)]
    pub view: ViewMode,

    /// Diff the texts as loaded, without artifact removal.
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// Column width of each side in side-by-side view.
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Only print the change statistics.
    #[arg(long, default_value_t = false)]
    pub stats_only: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    #[arg(long, value_enum, default_value_t = BillVersion::Original)]
    pub from: BillVersion,

    #[arg(long, value_enum, default_value_t = BillVersion::Hfsc)]
    pub to: BillVersion,

    #[arg(long, value_enum, default_value_t = ExportFormat::Html)]
    pub format: ExportFormat,

    #[arg(long, default_value = "exports")]
    pub output_dir: PathBuf,

    #[arg(long, default_value_t = false)]
    pub no_line_numbers: bool,

    #[arg(long, default_value_t = false)]
    pub raw: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Summarize one section instead of the whole document.
    #[arg(long)]
    pub section: Option<String>,

    /// Program that reads a prompt on stdin and writes a summary to stdout.
    #[arg(long, env = "BILLDIFF_SUMMARIZER")]
    pub command: Option<String>,

    /// Print the prompt that would be sent and stop.
    #[arg(long, default_value_t = false)]
    pub prompt_only: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}
