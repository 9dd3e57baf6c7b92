//! Artifact stripping for bill text extracted from committee PDFs.
//!
//! Page numbers, `VerDate` stamps, file paths and similar pagination noise
//! shift around between printings without any substantive edit, so both
//! sides of a comparison are passed through [`BillTextNormalizer`] first.

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

/// Minimum number of section headers the substantive-content pass must keep
/// before its output is trusted over the plain normalized text.
pub const MIN_SUBSTANTIVE_SECTIONS: usize = 5;

const ENACTMENT_MARKERS: [&str; 2] = ["Be it enacted by", "SECTION 1."];

#[derive(Debug)]
pub struct BillTextNormalizer {
    verdate_line: Regex,
    path_line: Regex,
    clock_line: Regex,
    page_number_line: Regex,
    leader_dots_line: Regex,
    xml_marker_line: Regex,
    paired_number_line: Regex,
    embedded_time: Regex,
    embedded_date: Regex,
    section_prefix: Regex,
    section_header: Regex,
    space_before_punctuation: Regex,
    space_after_punctuation: Regex,
}

impl BillTextNormalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            verdate_line: Regex::new(r"^VerDate\b").context("failed to compile VerDate regex")?,
            path_line: Regex::new(r"^(?:[A-Za-z]:\\|\\\\)")
                .context("failed to compile file path regex")?,
            clock_line: Regex::new(r"(?i)^\d{1,2}:\d{2}\s*(?:[ap]\.m\.|[ap]m\b)")
                .context("failed to compile clock line regex")?,
            page_number_line: Regex::new(r"^\d+$")
                .context("failed to compile page number regex")?,
            leader_dots_line: Regex::new(r"^\.{5,}$")
                .context("failed to compile leader dots regex")?,
            xml_marker_line: Regex::new(r"(?i)^[A-Z]+(?:_[A-Z]+)+\.XML$")
                .context("failed to compile xml marker regex")?,
            paired_number_line: Regex::new(r"^\(\d+\|\d+\)$")
                .context("failed to compile paired number regex")?,
            embedded_time: Regex::new(r"(?i)\b\d{1,2}:\d{2}\s*(?:a\.m\.|p\.m\.|am\b|pm\b)")
                .context("failed to compile embedded time regex")?,
            embedded_date: Regex::new(
                r"(?i)\b(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},\s+\d{4}\b",
            )
            .context("failed to compile embedded date regex")?,
            section_prefix: Regex::new(r"^\d+\s+(SEC\.|SECTION)\s+")
                .context("failed to compile section prefix regex")?,
            section_header: Regex::new(r"^(?:SEC\.|SECTION)\s+\d+")
                .context("failed to compile section header regex")?,
            space_before_punctuation: Regex::new(r"[ \t]+([,.;:])")
                .context("failed to compile punctuation spacing regex")?,
            space_after_punctuation: Regex::new(r"([,.;:])[ \t]+")
                .context("failed to compile punctuation spacing regex")?,
        })
    }

    /// Strip pagination and metadata artifacts, collapse whitespace and drop
    /// empty lines. Idempotent.
    pub fn normalize(&self, raw: &str) -> String {
        unify_line_endings(raw)
            .split('\n')
            .filter_map(|line| self.normalize_line(line))
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// Normalize, keep only the enacted body when it can be located, then
    /// fold typographic variants so that quote and dash styles never show up
    /// as changes.
    pub fn prepare_for_diff(&self, raw: &str) -> String {
        let normalized = self.normalize(raw);
        let substantive = self.extract_substantive_content(&normalized);
        self.normalize_typography(&substantive)
    }

    /// Keep lines from the enactment clause onward. Falls back to the input
    /// unchanged when fewer than [`MIN_SUBSTANTIVE_SECTIONS`] section headers
    /// survive, so a document with an unexpected layout is never emptied.
    pub fn extract_substantive_content(&self, normalized: &str) -> String {
        let mut kept = Vec::<&str>::new();
        let mut in_content = false;
        let mut section_count = 0usize;

        for line in normalized.lines() {
            if ENACTMENT_MARKERS.iter().any(|marker| line.contains(marker)) {
                in_content = true;
            }
            if !in_content {
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() || self.is_artifact_line(trimmed) {
                continue;
            }

            kept.push(line);
            if self.section_header.is_match(trimmed) {
                section_count += 1;
            }
        }

        if section_count < MIN_SUBSTANTIVE_SECTIONS {
            debug!(
                section_count,
                kept_lines = kept.len(),
                "substantive extraction found too few sections; using full normalized text"
            );
            return normalized.to_string();
        }

        kept.join("\n")
    }

    pub fn normalize_typography(&self, text: &str) -> String {
        let folded = text
            .chars()
            .map(|character| match character {
                '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => '"',
                '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => '\'',
                '\u{2014}' | '\u{2013}' => '-',
                other => other,
            })
            .collect::<String>();

        let tightened = self.space_before_punctuation.replace_all(&folded, "${1}");
        self.space_after_punctuation
            .replace_all(&tightened, "${1} ")
            .into_owned()
    }

    /// True for lines that carry no bill content at all.
    pub fn is_artifact_line(&self, line: &str) -> bool {
        self.verdate_line.is_match(line)
            || self.path_line.is_match(line)
            || self.clock_line.is_match(line)
            || self.page_number_line.is_match(line)
            || self.leader_dots_line.is_match(line)
            || self.xml_marker_line.is_match(line)
            || self.paired_number_line.is_match(line)
    }

    fn normalize_line(&self, raw_line: &str) -> Option<String> {
        let line = collapse_spaces(raw_line);
        if line.is_empty() || self.is_artifact_line(&line) {
            return None;
        }

        let stripped = collapse_spaces(&self.strip_embedded_stamps(&line));
        if stripped.is_empty() || self.is_artifact_line(&stripped) {
            return None;
        }

        Some(self.section_prefix.replace(&stripped, "${1} ").into_owned())
    }

    fn strip_embedded_stamps(&self, line: &str) -> String {
        // Removing one stamp can splice its neighbours into another.
        let mut current = line.to_string();
        loop {
            let without_time = self.embedded_time.replace_all(&current, "");
            let next = self
                .embedded_date
                .replace_all(&without_time, "")
                .into_owned();
            if next == current {
                return current;
            }
            current = next;
        }
    }
}

fn unify_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

fn collapse_spaces(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut previous_space = false;
    for character in line.chars() {
        let character = if character == '\t' { ' ' } else { character };
        if character == ' ' {
            if previous_space {
                continue;
            }
            previous_space = true;
        } else {
            previous_space = false;
        }
        out.push(character);
    }
    out.trim().to_string()
}
