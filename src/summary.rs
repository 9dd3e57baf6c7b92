//! Boundary to the external text-generation service used for summaries.
//!
//! The core only builds a bounded prompt and turns whatever comes back,
//! failures included, into something the caller can show.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, warn};

use crate::model::BillSection;
use crate::util::truncate_chars;

pub const SECTION_PROMPT_CHARS: usize = 2000;
pub const DOCUMENT_PROMPT_CHARS: usize = 3000;

const SECTION_INSTRUCTION: &str = "Provide a concise summary of this legislative section in 2-3 sentences. Focus on the key provisions and their implications:";
const DOCUMENT_INSTRUCTION: &str = "Concisely summarize the key points of the following legislative text in 2-3 short paragraphs, focusing on the core provisions, objectives, and any noted differences or implications for regulatory frameworks:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRequest {
    pub subject: String,
    pub prompt: String,
    pub truncated: bool,
}

impl SummaryRequest {
    pub fn for_section(section: &BillSection) -> Self {
        let content = truncate_chars(&section.content, SECTION_PROMPT_CHARS);
        let truncated = content.len() < section.content.len();
        let subject = if section.title.is_empty() {
            section.section_number.clone()
        } else {
            format!("{} - {}", section.section_number, section.title)
        };

        Self {
            prompt: format!(
                "{SECTION_INSTRUCTION}\n\nSection: {subject}\nContent: {content}{}",
                if truncated { "..." } else { "" }
            ),
            subject,
            truncated,
        }
    }

    pub fn for_document(label: &str, text: &str) -> Self {
        let excerpt = truncate_chars(text, DOCUMENT_PROMPT_CHARS);

        Self {
            subject: label.to_string(),
            prompt: format!("{DOCUMENT_INSTRUCTION}\n\n{excerpt}"),
            truncated: excerpt.len() < text.len(),
        }
    }
}

pub trait SummaryBackend {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Runs an external program with the prompt on stdin and reads the summary
/// from stdout.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    program: String,
    args: Vec<String>,
}

impl CommandBackend {
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(ToOwned::to_owned);
        let Some(program) = parts.next() else {
            bail!("summarizer command is empty");
        };

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl SummaryBackend for CommandBackend {
    fn generate(&self, prompt: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to execute summarizer '{}'", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(prompt.as_bytes())
                .with_context(|| format!("failed to send prompt to '{}'", self.program))?;
        }

        let output = child
            .wait_with_output()
            .with_context(|| format!("failed to wait for summarizer '{}'", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "summarizer '{}' returned non-zero exit status: {}",
                self.program,
                stderr.trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "lowercase")]
pub enum SummaryOutcome {
    Summary(String),
    Failed(String),
}

/// Never returns an error: backend failures and empty answers become
/// [`SummaryOutcome::Failed`] with a message meant for the reader.
pub fn request_summary(backend: &dyn SummaryBackend, request: &SummaryRequest) -> SummaryOutcome {
    info!(
        subject = %request.subject,
        prompt_chars = request.prompt.chars().count(),
        truncated = request.truncated,
        "requesting summary"
    );

    match backend.generate(&request.prompt) {
        Ok(text) if text.trim().is_empty() => {
            warn!(subject = %request.subject, "summarizer returned an empty response");
            SummaryOutcome::Failed(
                "Failed to generate summary: the summarizer returned an empty response.".to_string(),
            )
        }
        Ok(text) => SummaryOutcome::Summary(text),
        Err(error) => {
            warn!(subject = %request.subject, error = %format!("{error:#}"), "summary request failed");
            SummaryOutcome::Failed(format!(
                "Failed to generate summary: {error}. Please try again."
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;
    use crate::model::SectionKind;

    struct FixedBackend(Result<String, String>);

    impl SummaryBackend for FixedBackend {
        fn generate(&self, _prompt: &str) -> Result<String> {
            self.0.clone().map_err(|message| anyhow!(message))
        }
    }

    fn section(content: &str) -> BillSection {
        BillSection {
            section_number: "SEC. 101".to_string(),
            title: "DEFINITIONS".to_string(),
            content: content.to_string(),
            line_start: 1,
            line_end: 2,
            level: 1,
            kind: SectionKind::Section,
            subsections: Vec::new(),
            citations: Vec::new(),
        }
    }

    #[test]
    fn section_prompt_is_truncated_to_limit() {
        let long = "x".repeat(SECTION_PROMPT_CHARS + 500);
        let request = SummaryRequest::for_section(&section(&long));

        assert!(request.truncated);
        assert_eq!(request.subject, "SEC. 101 - DEFINITIONS");
        assert!(request.prompt.contains("Section: SEC. 101 - DEFINITIONS\nContent: "));
        assert!(request.prompt.ends_with("..."));
        let body_chars = request.prompt.chars().filter(|character| *character == 'x').count();
        assert_eq!(body_chars, SECTION_PROMPT_CHARS);
    }

    #[test]
    fn short_section_prompt_is_sent_whole() {
        let request = SummaryRequest::for_section(&section("The term means a thing."));
        assert!(!request.truncated);
        assert!(request.prompt.ends_with("Content: The term means a thing."));
    }

    #[test]
    fn document_prompt_truncates_on_char_boundaries() {
        let text = "—".repeat(DOCUMENT_PROMPT_CHARS + 10);
        let request = SummaryRequest::for_document("Original Bill", &text);

        assert!(request.truncated);
        assert_eq!(
            request.prompt.chars().filter(|character| *character == '—').count(),
            DOCUMENT_PROMPT_CHARS
        );
    }

    #[test]
    fn successful_backend_yields_summary() {
        let backend = FixedBackend(Ok("A short summary.".to_string()));
        let request = SummaryRequest::for_document("HFSC", "text");

        assert_eq!(
            request_summary(&backend, &request),
            SummaryOutcome::Summary("A short summary.".to_string())
        );
    }

    #[test]
    fn backend_failure_becomes_visible_message() {
        let backend = FixedBackend(Err("network unreachable".to_string()));
        let request = SummaryRequest::for_document("HFSC", "text");

        match request_summary(&backend, &request) {
            SummaryOutcome::Failed(message) => assert!(message.contains("network unreachable")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn empty_response_is_a_failure() {
        let backend = FixedBackend(Ok("   ".to_string()));
        let request = SummaryRequest::for_document("HAG", "text");

        assert!(matches!(
            request_summary(&backend, &request),
            SummaryOutcome::Failed(_)
        ));
    }

    #[test]
    fn empty_command_line_is_rejected() {
        assert!(CommandBackend::from_command_line("   ").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn command_backend_pipes_prompt_through_program() {
        let backend = CommandBackend::from_command_line("cat").expect("command parses");
        let request = SummaryRequest::for_document("Original", "echo me");

        match request_summary(&backend, &request) {
            SummaryOutcome::Summary(text) => assert!(text.ends_with("echo me")),
            other => panic!("expected summary, got {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_reported_not_raised() {
        let backend = CommandBackend::from_command_line("billdiff-no-such-summarizer-binary")
            .expect("command parses");
        let request = SummaryRequest::for_document("Original", "text");

        assert!(matches!(
            request_summary(&backend, &request),
            SummaryOutcome::Failed(_)
        ));
    }
}
