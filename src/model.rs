use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BILL_TITLE: &str = "Digital Asset Market Clarity Act of 2025";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BillVersion {
    Original,
    Hfsc,
    Hag,
}

impl BillVersion {
    pub const ALL: [BillVersion; 3] = [BillVersion::Original, BillVersion::Hfsc, BillVersion::Hag];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Hfsc => "hfsc",
            Self::Hag => "hag",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Original => "Original Bill",
            Self::Hfsc => "HFSC Amendment",
            Self::Hag => "HAG Amendment",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Title,
    Section,
    /// Level 2, reserved for lettered subsections; the parser does not emit it yet.
    Subsection,
}

impl SectionKind {
    pub fn level(self) -> u8 {
        match self {
            Self::Title => 0,
            Self::Section => 1,
            Self::Subsection => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Section => "section",
            Self::Subsection => "subsection",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSection {
    pub section_number: String,
    pub title: String,
    pub content: String,
    pub line_start: usize,
    pub line_end: usize,
    pub level: u8,
    pub kind: SectionKind,
    pub subsections: Vec<BillSection>,
    pub citations: Vec<String>,
}

impl BillSection {
    /// Depth-first walk over this section and all of its descendants.
    pub fn walk(&self) -> Vec<&BillSection> {
        let mut out = vec![self];
        for child in &self.subsections {
            out.extend(child.walk());
        }
        out
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedBill {
    pub title: String,
    pub version: BillVersion,
    pub date: String,
    pub sections: Vec<BillSection>,
    #[serde(skip_serializing)]
    pub raw_text: String,
}

impl ParsedBill {
    pub fn all_sections(&self) -> Vec<&BillSection> {
        self.sections.iter().flat_map(BillSection::walk).collect()
    }

    /// Find a section by number, ignoring case and surrounding whitespace
    /// (`"sec. 103"`, `"TITLE II"`).
    pub fn find_section(&self, number: &str) -> Option<&BillSection> {
        let wanted = number.split_whitespace().collect::<Vec<&str>>().join(" ");
        self.all_sections()
            .into_iter()
            .find(|section| section.section_number.eq_ignore_ascii_case(&wanted))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub version: BillVersion,
    pub path: String,
    pub byte_count: usize,
    pub line_count: usize,
    pub sha256: String,
    pub detected_version: BillVersion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub data_directory: String,
    pub document_count: usize,
    pub documents: Vec<DocumentEntry>,
}
