use super::*;

#[derive(Debug)]
pub(super) struct MetadataPatterns {
    short_title: Regex,
    date_stamp: Regex,
}

impl MetadataPatterns {
    pub(super) fn new() -> Result<Self> {
        Ok(Self {
            short_title: Regex::new(r#"may be cited as the\s+["\u{201C}]([^"\u{201D}]+)["\u{201D}]"#)
                .context("failed to compile short title regex")?,
            date_stamp: Regex::new(r"(\w+ \d+, \d{4}) \([\d:]+ [ap]\.m\.\)")
                .context("failed to compile date stamp regex")?,
        })
    }

    pub(super) fn extract_title(&self, raw: &str) -> String {
        self.short_title
            .captures(raw)
            .and_then(|captures| captures.get(1))
            .map(|value| value.as_str().trim().to_string())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| DEFAULT_BILL_TITLE.to_string())
    }

    pub(super) fn extract_date(&self, raw: &str) -> String {
        self.date_stamp
            .captures(raw)
            .and_then(|captures| captures.get(1))
            .map(|value| value.as_str().to_string())
            .unwrap_or_default()
    }
}

/// Committee prints embed the source XML filename; the original bill does not.
pub fn detect_version(raw: &str) -> BillVersion {
    let lowered = raw.to_ascii_lowercase();
    if lowered.contains("clarity_ans_ag.xml") {
        BillVersion::Hag
    } else if lowered.contains("clarity_ans_fsc.xml") {
        BillVersion::Hfsc
    } else {
        BillVersion::Original
    }
}
