use super::*;

fn parser() -> BillTextParser {
    BillTextParser::new().expect("parser regexes compile")
}

#[test]
fn titles_own_the_sections_that_follow_them() {
    let raw = "TITLE I—FOO\nSEC. 1. BAR\ncontent line\nTITLE II—BAZ\nSEC. 2. QUX\n";
    let sections = parser().extract_sections(raw);

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].section_number, "TITLE I");
    assert_eq!(sections[0].title, "FOO");
    assert_eq!(sections[0].kind, SectionKind::Title);
    assert_eq!(sections[0].subsections.len(), 1);
    assert_eq!(sections[0].subsections[0].section_number, "SEC. 1");
    assert_eq!(sections[0].subsections[0].title, "BAR");
    assert!(sections[0].subsections[0].content.contains("content line"));

    assert_eq!(sections[1].section_number, "TITLE II");
    assert_eq!(sections[1].subsections.len(), 1);
    assert_eq!(sections[1].subsections[0].section_number, "SEC. 2");
    assert_eq!(sections[1].subsections[0].level, 1);
}

#[test]
fn sections_before_any_title_stay_top_level() {
    let raw = "SECTION 1. SHORT TITLE.\nThis Act may be cited.\nSEC. 2. TABLE.\nTITLE I—DEFINITIONS\nSEC. 101. DEFINITIONS.\n";
    let sections = parser().extract_sections(raw);

    let numbers = sections
        .iter()
        .map(|section| section.section_number.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(numbers, vec!["SEC. 1", "SEC. 2", "TITLE I"]);
    assert_eq!(sections[0].title, "SHORT TITLE");
    assert_eq!(sections[2].subsections[0].section_number, "SEC. 101");
}

#[test]
fn header_without_heading_text_yields_empty_title() {
    let raw = "TITLE III—\nSEC. 7.\nbody\n";
    let sections = parser().extract_sections(raw);

    assert_eq!(sections[0].title, "");
    assert_eq!(sections[0].subsections[0].section_number, "SEC. 7");
    assert_eq!(sections[0].subsections[0].title, "");
    assert_eq!(sections[0].subsections[0].content, "body");
}

#[test]
fn line_ranges_stop_before_the_next_header() {
    let raw = "preamble\nTITLE I—FOO\nintro\nSEC. 1. BAR\none\ntwo\n\nSEC. 2. BAZ\nthree\n";
    let sections = parser().extract_sections(raw);
    let title = &sections[0];

    assert_eq!((title.line_start, title.line_end), (2, 3));
    assert_eq!(title.content, "intro");

    let first = &title.subsections[0];
    assert_eq!((first.line_start, first.line_end), (4, 7));
    assert_eq!(first.content, "one\ntwo");

    let second = &title.subsections[1];
    assert_eq!((second.line_start, second.line_end), (8, 9));
}

#[test]
fn title_without_intro_ends_on_its_header_line() {
    let raw = "TITLE I—FOO\nSEC. 1. BAR\nbody\nTITLE II—BAZ\n\nSEC. 2. QUX\nmore\n";
    let sections = parser().extract_sections(raw);

    assert_eq!((sections[0].line_start, sections[0].line_end), (1, 1));
    assert_eq!(
        (sections[0].subsections[0].line_start, sections[0].subsections[0].line_end),
        (2, 3)
    );
    assert_eq!((sections[1].line_start, sections[1].line_end), (4, 5));
    assert_eq!(
        (sections[1].subsections[0].line_start, sections[1].subsections[0].line_end),
        (6, 7)
    );
}

#[test]
fn adjacent_headers_produce_empty_content() {
    let raw = "SEC. 1. FIRST.\nSEC. 2. SECOND.\n";
    let sections = parser().extract_sections(raw);

    assert_eq!(sections[0].content, "");
    assert_eq!((sections[0].line_start, sections[0].line_end), (1, 1));
    assert_eq!((sections[1].line_start, sections[1].line_end), (2, 2));
}

#[test]
fn artifacts_are_excluded_from_section_content() {
    let raw = "SEC. 3. RULES.\nfirst part\n17\nVerDate Sep 11 2014 14:21 Jul 15, 2025\ng:\\VHLC\\071525.xml\nsecond part\n";
    let sections = parser().extract_sections(raw);

    assert_eq!(sections[0].content, "first part\nsecond part");
}

#[test]
fn lowercase_section_references_are_content_not_headers() {
    let raw = "SEC. 4. AMENDMENTS.\nSec. 5 of the Securities Act is amended.\nSection 2(a) is repealed.\n";
    let sections = parser().extract_sections(raw);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].content.lines().count(), 2);
}

#[test]
fn citations_cover_header_and_body_lines() {
    let raw = "SEC. 5. AMENDMENTS TO THE COMMODITY EXCHANGE ACT.\nSection 2(a) of the Commodity Exchange Act (7 U.S.C. 2(a)) is amended.\nSection 2(a) again.\nSEC. 6. OTHER.\n";
    let sections = parser().extract_sections(raw);

    assert_eq!(
        sections[0].citations,
        vec![
            "SEC. 5".to_string(),
            "COMMODITY EXCHANGE ACT".to_string(),
            "Section 2(a)".to_string(),
            "7 U.S.C. 2(a)".to_string(),
            "Commodity Exchange Act".to_string(),
        ]
    );
    assert_eq!(sections[1].citations, vec!["SEC. 6".to_string()]);
}

#[test]
fn line_numbered_section_headers_are_recognized() {
    let raw = "12 SEC. 103. DEFINITIONS.\nbody\n";
    let sections = parser().extract_sections(raw);

    assert_eq!(sections[0].section_number, "SEC. 103");
    assert_eq!(sections[0].title, "DEFINITIONS");
}

#[test]
fn classifier_tags_each_line_kind() {
    let parser = parser();
    let classes = "TITLE iv–MISC.\n\n42\nSEC. 4B. LETTERED.\nplain text"
        .lines()
        .map(|line| parser.classifier.classify(line))
        .collect::<Vec<LineClass<'_>>>();

    assert_eq!(
        classes,
        vec![
            LineClass::Title {
                numeral: "IV".to_string(),
                title: "MISC".to_string()
            },
            LineClass::Blank,
            LineClass::Artifact,
            LineClass::Section {
                number: "4B".to_string(),
                title: "LETTERED".to_string()
            },
            LineClass::Content("plain text"),
        ]
    );
}

#[test]
fn parse_extracts_metadata_with_defaults() {
    let parser = parser();

    let stamped = "CLARITY_ANS_FSC.XML\nJuly 15, 2025 (10:42 a.m.)\nThis Act may be cited as the \"Example Markets Act\".\n";
    let parsed = parser.parse(stamped);
    assert_eq!(parsed.version, BillVersion::Hfsc);
    assert_eq!(parsed.date, "July 15, 2025");
    assert_eq!(parsed.title, "Example Markets Act");
    assert_eq!(parsed.raw_text, stamped);

    let bare = parser.parse("no metadata here");
    assert_eq!(bare.version, BillVersion::Original);
    assert_eq!(bare.date, "");
    assert_eq!(bare.title, DEFAULT_BILL_TITLE);
    assert!(bare.sections.is_empty());
}

#[test]
fn version_detection_prefers_agriculture_marker() {
    assert_eq!(detect_version("g:\\CLARITY_ANS_AG.XML"), BillVersion::Hag);
    assert_eq!(detect_version("clarity_ans_fsc.xml"), BillVersion::Hfsc);
}

#[test]
fn find_section_walks_nested_sections() {
    let parsed = parser().parse("TITLE I—FOO\nSEC. 101. BAR.\nbody\n");

    assert_eq!(
        parsed.find_section("sec.  101").map(|section| section.title.as_str()),
        Some("BAR")
    );
    assert_eq!(
        parsed.find_section("title i").map(|section| section.kind),
        Some(SectionKind::Title)
    );
    assert!(parsed.find_section("SEC. 999").is_none());
}

#[test]
fn search_attributes_hits_to_enclosing_section() {
    let raw = "Preamble mentions tokens\nSEC. 2. DIGITAL COMMODITIES.\nA digital commodity TOKEN is defined.\n";
    let hits = parser().search_in_bill(raw, "token");

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].line_number, 1);
    assert_eq!(hits[0].section, "");
    assert_eq!(hits[1].line_number, 3);
    assert_eq!(hits[1].section, "Section 2: DIGITAL COMMODITIES");
}

#[test]
fn search_ignores_single_character_queries() {
    assert!(parser().search_in_bill("a b c", "a").is_empty());
}

#[test]
fn highlight_treats_regex_metacharacters_literally() {
    let segments = highlight("see 7 U.S.C. 1a (b) and 7 USxC 1a", "U.S.C. 1a (b)")
        .expect("escaped pattern compiles");

    let matched = segments
        .iter()
        .filter(|segment| segment.matched)
        .map(|segment| segment.text.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(matched, vec!["U.S.C. 1a (b)"]);

    let rebuilt = segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect::<String>();
    assert_eq!(rebuilt, "see 7 U.S.C. 1a (b) and 7 USxC 1a");
}

#[test]
fn highlight_is_case_insensitive() {
    let segments = highlight("Commodity and COMMODITY", "commodity").expect("pattern compiles");
    assert_eq!(segments.iter().filter(|segment| segment.matched).count(), 2);
}
