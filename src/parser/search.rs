use regex::RegexBuilder;
use serde::Serialize;

use super::*;

pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub line_number: usize,
    pub text: String,
    pub section: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub text: String,
    pub matched: bool,
}

impl BillTextParser {
    /// Case-insensitive substring search. Each hit is attributed to the most
    /// recent section header above it.
    pub fn search_in_bill(&self, raw: &str, query: &str) -> Vec<SearchHit> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        let mut current_section = String::new();
        let mut hits = Vec::new();

        for (index, line) in raw.lines().enumerate() {
            if let LineClass::Section { number, title } = self.classifier.classify(line) {
                current_section = format!("Section {number}: {title}");
            }

            if line.to_lowercase().contains(&needle) {
                hits.push(SearchHit {
                    line_number: index + 1,
                    text: line.trim().to_string(),
                    section: current_section.clone(),
                });
            }
        }

        hits
    }
}

/// Split `text` into matched and unmatched runs of `query`. The query is
/// escaped before compilation, so any user input is matched literally.
pub fn highlight(text: &str, query: &str) -> Result<Vec<Highlight>> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Ok(vec![Highlight {
            text: text.to_string(),
            matched: false,
        }]);
    }

    let pattern = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .with_context(|| format!("failed to compile search pattern for '{query}'"))?;

    let mut segments = Vec::new();
    let mut cursor = 0usize;
    for found in pattern.find_iter(text) {
        if found.start() > cursor {
            segments.push(Highlight {
                text: text[cursor..found.start()].to_string(),
                matched: false,
            });
        }
        segments.push(Highlight {
            text: found.as_str().to_string(),
            matched: true,
        });
        cursor = found.end();
    }
    if cursor < text.len() || segments.is_empty() {
        segments.push(Highlight {
            text: text[cursor..].to_string(),
            matched: false,
        });
    }

    Ok(segments)
}
