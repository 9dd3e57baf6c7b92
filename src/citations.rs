use std::collections::HashSet;

use anyhow::{Context, Result};
use regex::Regex;

/// Statutory citation scanner. Every pattern runs over the whole input; the
/// pooled matches are deduplicated by exact text, keeping first occurrence.
#[derive(Debug)]
pub struct CitationExtractor {
    patterns: Vec<Regex>,
}

impl CitationExtractor {
    pub fn new() -> Result<Self> {
        let sources = [
            ("section reference", r"(?i)(?:Section|Sec\.?)\s+\d+(?:\([a-z]\))?(?:\(\d+\))?"),
            ("U.S.C.", r"(?i)\d+\s+U\.S\.C\.?\s+\d+[a-z]?(?:\([a-z]\))?"),
            ("C.F.R.", r"(?i)\d+\s+C\.F\.R\.?\s+(?:Part\s+)?\d+(?:\.\d+)?"),
            ("act of year", r"(?i)(?:Securities\s+)?(?:Exchange\s+)?Act\s+of\s+\d{4}"),
            ("Commodity Exchange Act", r"(?i)Commodity\s+Exchange\s+Act"),
        ];

        let patterns = sources
            .iter()
            .map(|(name, source)| {
                Regex::new(source).with_context(|| format!("failed to compile {name} citation regex"))
            })
            .collect::<Result<Vec<Regex>>>()?;

        Ok(Self { patterns })
    }

    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::<String>::new();
        let mut citations = Vec::new();
        self.collect_into(text, &mut seen, &mut citations);
        citations
    }

    /// Extract over several lines, sharing one dedup set so the result keeps
    /// the order in which citations first appear across the lines.
    pub fn extract_from_lines<'a, I>(&self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::<String>::new();
        let mut citations = Vec::new();
        for line in lines {
            self.collect_into(line, &mut seen, &mut citations);
        }
        citations
    }

    fn collect_into(&self, text: &str, seen: &mut HashSet<String>, out: &mut Vec<String>) {
        for pattern in &self.patterns {
            for found in pattern.find_iter(text) {
                let citation = found.as_str().to_string();
                if seen.insert(citation.clone()) {
                    out.push(citation);
                }
            }
        }
    }
}
