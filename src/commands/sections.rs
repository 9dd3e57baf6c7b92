use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::cli::SectionsArgs;
use crate::model::{BillSection, ParsedBill};
use crate::parser::BillTextParser;

use super::{load_selected, print_json, require_section};

#[derive(Debug, Serialize)]
struct SectionsResponse<'a> {
    title: &'a str,
    version: &'a str,
    date: &'a str,
    section_count: usize,
    sections: &'a [BillSection],
}

pub fn run(args: SectionsArgs) -> Result<()> {
    let document = load_selected(&args.document)?;
    let parser = BillTextParser::new()?;
    let parsed = parser.parse(&document.text);

    info!(
        path = %document.path.display(),
        top_level = parsed.sections.len(),
        total = parsed.all_sections().len(),
        "extracted sections"
    );

    if let Some(number) = args.section.as_deref() {
        let section = require_section(&parsed, number)?;
        return if args.json {
            print_json(section)
        } else {
            emit_section_detail(section)
        };
    }

    if args.json {
        return print_json(&SectionsResponse {
            title: &parsed.title,
            version: parsed.version.as_str(),
            date: &parsed.date,
            section_count: parsed.all_sections().len(),
            sections: &parsed.sections,
        });
    }

    emit_outline(&parsed)
}

fn emit_outline(parsed: &ParsedBill) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "{}", parsed.title)?;
    writeln!(output, "Version: {}", parsed.version.label())?;
    writeln!(output, "Lines: {}", parsed.raw_text.lines().count())?;
    if !parsed.date.is_empty() {
        writeln!(output, "Date: {}", parsed.date)?;
    }
    writeln!(output)?;

    if parsed.sections.is_empty() {
        writeln!(output, "No sections found.")?;
    }

    for section in parsed.all_sections() {
        writeln!(output, "{}", outline_line(section))?;
    }

    output.flush()?;
    Ok(())
}

fn outline_line(section: &BillSection) -> String {
    let indent = "  ".repeat(usize::from(section.level));
    let heading = if section.title.is_empty() {
        section.section_number.clone()
    } else {
        format!("{}. {}", section.section_number, section.title)
    };
    format!(
        "{indent}{heading}  [lines {}-{}]",
        section.line_start, section.line_end
    )
}

fn emit_section_detail(section: &BillSection) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "{} {}", section.section_number, section.title)?;
    writeln!(
        output,
        "Lines {}-{} ({})",
        section.line_start,
        section.line_end,
        section.kind.as_str()
    )?;
    if !section.citations.is_empty() {
        writeln!(output, "Citations: {}", section.citations.join("; "))?;
    }
    writeln!(output)?;
    writeln!(output, "{}", section.content)?;

    for child in &section.subsections {
        writeln!(output, "  {}", outline_line(child).trim_start())?;
    }

    output.flush()?;
    Ok(())
}
