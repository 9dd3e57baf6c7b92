//! Section structure for raw bill text.
//!
//! Parsing is two small stages: [`LineClassifier`] tags every line as a
//! header, content or artifact, and a tree builder folds that stream into
//! Titles owning their Sections. Headers quoted inside amendment text look
//! exactly like real ones and are treated as real ones.

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use crate::citations::CitationExtractor;
use crate::model::{BillSection, BillVersion, DEFAULT_BILL_TITLE, ParsedBill, SectionKind};
use crate::normalize::BillTextNormalizer;

mod classify;
mod metadata;
mod search;
#[cfg(test)]
mod tests;
mod tree;

pub use classify::{LineClass, LineClassifier};
pub use metadata::detect_version;
pub use search::{Highlight, MIN_QUERY_CHARS, SearchHit, highlight};

use metadata::MetadataPatterns;
use tree::TreeBuilder;

#[derive(Debug)]
pub struct BillTextParser {
    classifier: LineClassifier,
    citations: CitationExtractor,
    metadata: MetadataPatterns,
}

impl BillTextParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            classifier: LineClassifier::new()?,
            citations: CitationExtractor::new()?,
            metadata: MetadataPatterns::new()?,
        })
    }

    pub fn parse(&self, raw: &str) -> ParsedBill {
        let sections = self.extract_sections(raw);
        let version = detect_version(raw);

        debug!(
            version = version.as_str(),
            top_level_sections = sections.len(),
            "parsed bill structure"
        );

        ParsedBill {
            title: self.metadata.extract_title(raw),
            version,
            date: self.metadata.extract_date(raw),
            sections,
            raw_text: raw.to_string(),
        }
    }

    pub fn extract_sections(&self, raw: &str) -> Vec<BillSection> {
        let mut builder = TreeBuilder::new(&self.citations);
        let mut total_lines = 0usize;

        for (index, line) in raw.lines().enumerate() {
            total_lines = index + 1;
            builder.push(index + 1, line, self.classifier.classify(line));
        }

        builder.finish(total_lines)
    }

    pub fn citations(&self) -> &CitationExtractor {
        &self.citations
    }
}
