use super::*;

/// One raw bill line, tagged by what it means for the section tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    Blank,
    Artifact,
    Title { numeral: String, title: String },
    Section { number: String, title: String },
    Content(&'a str),
}

#[derive(Debug)]
pub struct LineClassifier {
    title_header: Regex,
    section_header: Regex,
    artifacts: BillTextNormalizer,
}

impl LineClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title_header: Regex::new(r"(?i)^TITLE\s+([IVXLCDM]+)\s*[—–-]\s*(.*)$")
                .context("failed to compile title header regex")?,
            section_header: Regex::new(r"^(?:\d+\s+)?(?:SEC\.?|SECTION)\s*(\d+[A-Z]?)\.?(?:\s+(.*))?$")
                .context("failed to compile section header regex")?,
            artifacts: BillTextNormalizer::new()?,
        })
    }

    pub fn classify<'a>(&self, raw_line: &'a str) -> LineClass<'a> {
        let line = raw_line.trim();
        if line.is_empty() {
            return LineClass::Blank;
        }
        if self.artifacts.is_artifact_line(line) {
            return LineClass::Artifact;
        }

        if let Some(captures) = self.title_header.captures(line) {
            let numeral = captures
                .get(1)
                .map(|value| value.as_str().to_ascii_uppercase())
                .unwrap_or_default();
            let title = captures.get(2).map(|value| value.as_str()).unwrap_or("");
            return LineClass::Title {
                numeral,
                title: clean_heading(title),
            };
        }

        if let Some(captures) = self.section_header.captures(line) {
            let number = captures
                .get(1)
                .map(|value| value.as_str().to_string())
                .unwrap_or_default();
            let title = captures.get(2).map(|value| value.as_str()).unwrap_or("");
            return LineClass::Section {
                number,
                title: clean_heading(title),
            };
        }

        LineClass::Content(line)
    }
}

fn clean_heading(raw: &str) -> String {
    raw.trim().trim_end_matches('.').trim_end().to_string()
}
