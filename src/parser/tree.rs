use super::*;

#[derive(Debug)]
struct SectionDraft {
    kind: SectionKind,
    section_number: String,
    title: String,
    line_start: usize,
    /// Set on a Title when its first Section opens.
    content_end: Option<usize>,
    header_line: String,
    body_lines: Vec<String>,
    children: Vec<BillSection>,
}

impl SectionDraft {
    fn finalize(self, line_end: usize, citations: &CitationExtractor) -> BillSection {
        let cited = citations.extract_from_lines(
            std::iter::once(self.header_line.as_str())
                .chain(self.body_lines.iter().map(String::as_str)),
        );

        BillSection {
            section_number: self.section_number,
            title: self.title,
            content: self.body_lines.join("\n"),
            line_start: self.line_start,
            line_end: self.content_end.unwrap_or(line_end).max(self.line_start),
            level: self.kind.level(),
            kind: self.kind,
            subsections: self.children,
            citations: cited,
        }
    }
}

/// Folds classified lines into the section tree.
///
/// The open stack holds at most a Title and a Section beneath it. A node's
/// line range bounds its own content: it runs from its header to the line
/// before the next header, so a Title ends where its first Section begins.
pub(super) struct TreeBuilder<'c> {
    citations: &'c CitationExtractor,
    open: Vec<SectionDraft>,
    roots: Vec<BillSection>,
}

impl<'c> TreeBuilder<'c> {
    pub(super) fn new(citations: &'c CitationExtractor) -> Self {
        Self {
            citations,
            open: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Feed one line. `line_number` is 1-based.
    pub(super) fn push(&mut self, line_number: usize, raw_line: &str, class: LineClass<'_>) {
        match class {
            LineClass::Blank | LineClass::Artifact => {}
            LineClass::Title { numeral, title } => {
                self.close_while(line_number - 1, |_| true);
                self.open.push(SectionDraft {
                    kind: SectionKind::Title,
                    section_number: format!("TITLE {numeral}"),
                    title,
                    line_start: line_number,
                    content_end: None,
                    header_line: raw_line.trim().to_string(),
                    body_lines: Vec::new(),
                    children: Vec::new(),
                });
            }
            LineClass::Section { number, title } => {
                self.close_while(line_number - 1, |draft| draft.kind != SectionKind::Title);
                if let Some(title) = self.open.last_mut()
                    && title.content_end.is_none()
                {
                    title.content_end = Some(line_number - 1);
                }
                self.open.push(SectionDraft {
                    kind: SectionKind::Section,
                    section_number: format!("SEC. {number}"),
                    title,
                    line_start: line_number,
                    content_end: None,
                    header_line: raw_line.trim().to_string(),
                    body_lines: Vec::new(),
                    children: Vec::new(),
                });
            }
            LineClass::Content(text) => {
                if let Some(draft) = self.open.last_mut() {
                    draft.body_lines.push(text.to_string());
                }
            }
        }
    }

    pub(super) fn finish(mut self, total_lines: usize) -> Vec<BillSection> {
        self.close_while(total_lines, |_| true);
        self.roots
    }

    fn close_while(&mut self, line_end: usize, should_close: impl Fn(&SectionDraft) -> bool) {
        while self.open.last().is_some_and(&should_close) {
            let Some(draft) = self.open.pop() else {
                break;
            };
            let section = draft.finalize(line_end, self.citations);
            match self.open.last_mut() {
                Some(parent) => parent.children.push(section),
                None => self.roots.push(section),
            }
        }
    }
}
