//! Line diff between two bill texts plus the statistics and per-line
//! records the compare view and exporter render from.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use similar::{Algorithm, DiffTag, capture_diff_slices};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunKind {
    Unchanged,
    Added,
    Removed,
}

/// A maximal block of lines sharing one kind. `value` keeps the line
/// terminators of the side it was taken from, so dropping added runs gives
/// back the first text and dropping removed runs gives back the second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRun {
    pub value: String,
    pub kind: RunKind,
}

impl DiffRun {
    /// Lines of this run without terminators. A trailing terminator does not
    /// produce an extra empty line.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.value
            .split_terminator('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
    }
}

/// Myers line diff. Lines compare with their terminators, so `\r\n` and
/// `\n` lines differ. The one exception is a final line whose terminator is
/// missing on one side only: it still matches, and the stray terminator
/// becomes a terminator-only run after it.
pub fn diff_lines(old: &str, new: &str) -> Vec<DiffRun> {
    let old_lines = old.split_inclusive('\n').collect::<Vec<&str>>();
    let new_lines = new.split_inclusive('\n').collect::<Vec<&str>>();
    let old_keys = comparison_keys(&old_lines, new_lines.last().copied());
    let new_keys = comparison_keys(&new_lines, old_lines.last().copied());

    let mut runs = Vec::<DiffRun>::new();
    for op in capture_diff_slices(Algorithm::Myers, &old_keys, &new_keys) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => {
                push_equal(&mut runs, &old_lines[old_range], &new_lines[new_range])
            }
            DiffTag::Delete => push_run(&mut runs, RunKind::Removed, &old_lines[old_range]),
            DiffTag::Insert => push_run(&mut runs, RunKind::Added, &new_lines[new_range]),
            DiffTag::Replace => {
                push_run(&mut runs, RunKind::Removed, &old_lines[old_range]);
                push_run(&mut runs, RunKind::Added, &new_lines[new_range]);
            }
        }
    }

    runs
}

/// Whole lines as keys. An unterminated final line borrows the other text's
/// final terminator so that end-of-file newline differences still match.
fn comparison_keys<'a>(lines: &[&'a str], other_last: Option<&str>) -> Vec<Cow<'a, str>> {
    let mut keys = lines.iter().map(|line| Cow::Borrowed(*line)).collect::<Vec<_>>();
    if let Some(last) = lines.last()
        && terminator(last).is_empty()
        && let Some(other) = other_last
        && !terminator(other).is_empty()
    {
        let index = keys.len() - 1;
        keys[index] = Cow::Owned(format!("{last}{}", terminator(other)));
    }
    keys
}

fn terminator(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

fn push_equal(runs: &mut Vec<DiffRun>, old_lines: &[&str], new_lines: &[&str]) {
    match (old_lines.split_last(), new_lines.split_last()) {
        (Some((old_last, old_rest)), Some((new_last, _))) if old_last != new_last => {
            push_run(runs, RunKind::Unchanged, old_rest);
            let shared = &old_last[..old_last.len() - terminator(old_last).len()];
            push_run(runs, RunKind::Unchanged, &[shared]);
            push_run(runs, RunKind::Removed, &[terminator(old_last)]);
            push_run(runs, RunKind::Added, &[terminator(new_last)]);
        }
        _ => push_run(runs, RunKind::Unchanged, old_lines),
    }
}

fn push_run(runs: &mut Vec<DiffRun>, kind: RunKind, lines: &[&str]) {
    let value = lines.concat();
    if value.is_empty() {
        return;
    }

    match runs.last_mut() {
        Some(last) if last.kind == kind => last.value.push_str(&value),
        _ => runs.push(DiffRun { value, kind }),
    }
}

/// Display lines of a run sequence, in order. The empty fragment left by a
/// terminator-only run after an unterminated unchanged line is not a line of
/// its own and is skipped.
pub fn line_records(runs: &[DiffRun]) -> Vec<(RunKind, &str)> {
    let mut records = Vec::new();
    let mut previous_open = false;

    for run in runs {
        let mut lines = run.lines();
        if previous_open && terminator_prefix(&run.value) {
            lines.next();
        }
        records.extend(lines.map(|line| (run.kind, line)));
        previous_open = run.kind == RunKind::Unchanged && !run.value.ends_with('\n');
    }

    records
}

fn terminator_prefix(value: &str) -> bool {
    value.starts_with('\n') || value.starts_with("\r\n")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub additions: usize,
    pub deletions: usize,
    pub unchanged: usize,
}

impl DiffStats {
    pub fn has_changes(&self) -> bool {
        self.additions > 0 || self.deletions > 0
    }
}

/// Count non-empty lines per run kind.
pub fn summarize(runs: &[DiffRun]) -> DiffStats {
    let mut stats = DiffStats::default();
    for run in runs {
        let count = run.lines().filter(|line| !line.is_empty()).count();
        match run.kind {
            RunKind::Added => stats.additions += count,
            RunKind::Removed => stats.deletions += count,
            RunKind::Unchanged => stats.unchanged += count,
        }
    }
    stats
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SideLine {
    pub number: Option<usize>,
    pub text: String,
    pub kind: RunKind,
    pub placeholder: bool,
}

impl SideLine {
    fn present(number: usize, text: &str, kind: RunKind) -> Self {
        Self {
            number: Some(number),
            text: text.to_string(),
            kind,
            placeholder: false,
        }
    }

    fn blank(kind: RunKind) -> Self {
        Self {
            number: None,
            text: String::new(),
            kind,
            placeholder: true,
        }
    }
}

/// Left/right columns of equal length. Each side numbers only the lines that
/// exist on it; the other side gets a blank placeholder.
pub fn to_side_by_side(runs: &[DiffRun]) -> (Vec<SideLine>, Vec<SideLine>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut left_number = 1usize;
    let mut right_number = 1usize;

    for (kind, line) in line_records(runs) {
        match kind {
            RunKind::Removed => {
                left.push(SideLine::present(left_number, line, kind));
                left_number += 1;
                right.push(SideLine::blank(kind));
            }
            RunKind::Added => {
                left.push(SideLine::blank(kind));
                right.push(SideLine::present(right_number, line, kind));
                right_number += 1;
            }
            RunKind::Unchanged => {
                left.push(SideLine::present(left_number, line, kind));
                right.push(SideLine::present(right_number, line, kind));
                left_number += 1;
                right_number += 1;
            }
        }
    }

    (left, right)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnifiedMarker {
    Added,
    Removed,
    Line(usize),
}

impl fmt::Display for UnifiedMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => f.write_str("+"),
            Self::Removed => f.write_str("-"),
            Self::Line(number) => write!(f, "{number}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnifiedLine {
    pub marker: UnifiedMarker,
    pub text: String,
}

/// Single column; unchanged lines carry a running number, changes a `+`/`-`.
pub fn to_unified(runs: &[DiffRun]) -> Vec<UnifiedLine> {
    let mut lines = Vec::new();
    let mut number = 1usize;

    for (kind, line) in line_records(runs) {
        let marker = match kind {
            RunKind::Added => UnifiedMarker::Added,
            RunKind::Removed => UnifiedMarker::Removed,
            RunKind::Unchanged => {
                let marker = UnifiedMarker::Line(number);
                number += 1;
                marker
            }
        };
        lines.push(UnifiedLine {
            marker,
            text: line.to_string(),
        });
    }

    lines
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::normalize::BillTextNormalizer;

    fn reconstruct(runs: &[DiffRun], skip: RunKind) -> String {
        runs.iter()
            .filter(|run| run.kind != skip)
            .map(|run| run.value.as_str())
            .collect()
    }

    #[test]
    fn self_diff_is_all_unchanged() {
        let text = "SEC. 1. SHORT TITLE.\n\nThis Act may be cited.\nSEC. 2. DEFINITIONS.\n";
        let runs = diff_lines(text, text);
        let stats = summarize(&runs);

        assert_eq!(runs.len(), 1);
        assert_eq!(stats.additions, 0);
        assert_eq!(stats.deletions, 0);
        assert_eq!(stats.unchanged, 3);
        assert!(!stats.has_changes());
    }

    #[test]
    fn runs_reconstruct_both_inputs() {
        let old = "alpha\nbeta\ngamma\ndelta\n";
        let new = "alpha\nbeta prime\ngamma\nepsilon\nzeta\n";
        let runs = diff_lines(old, new);

        assert_eq!(reconstruct(&runs, RunKind::Added), old);
        assert_eq!(reconstruct(&runs, RunKind::Removed), new);
    }

    #[test]
    fn replacement_emits_removed_before_added() {
        let runs = diff_lines("a\nb\nc\n", "a\nx\nc\n");
        let kinds = runs.iter().map(|run| run.kind).collect::<Vec<RunKind>>();

        assert_eq!(
            kinds,
            vec![
                RunKind::Unchanged,
                RunKind::Removed,
                RunKind::Added,
                RunKind::Unchanged
            ]
        );
        assert_eq!(runs[1].value, "b\n");
        assert_eq!(runs[2].value, "x\n");
    }

    #[test]
    fn missing_final_newline_is_not_a_change() {
        let old = "one\ntwo\n";
        let new = "one\ntwo";
        let runs = diff_lines(old, new);
        let stats = summarize(&runs);

        assert_eq!(stats.additions, 0);
        assert_eq!(stats.deletions, 0);
        assert_eq!(stats.unchanged, 2);
        assert_eq!(reconstruct(&runs, RunKind::Added), old);
        assert_eq!(reconstruct(&runs, RunKind::Removed), new);

        let rendered = to_unified(&runs)
            .iter()
            .map(|line| format!("{} {}", line.marker, line.text))
            .collect::<Vec<String>>();
        assert_eq!(rendered, vec!["1 one", "2 two"]);
    }

    #[test]
    fn missing_final_newline_on_first_side_reconstructs_both() {
        let old = "one\ntwo";
        let new = "one\ntwo\r\nthree\r\n";
        let runs = diff_lines(old, new);

        assert_eq!(reconstruct(&runs, RunKind::Added), old);
        assert_eq!(reconstruct(&runs, RunKind::Removed), new);

        let (left, right) = to_side_by_side(&runs);
        assert_eq!(left.len(), 3);
        assert_eq!(right[2].text, "three");
        assert!(left[2].placeholder);
    }

    #[test]
    fn line_ending_style_is_part_of_the_line() {
        let old = "alpha\r\nbeta\r\n";
        let new = "alpha\nbeta\n";
        let runs = diff_lines(old, new);

        assert_eq!(reconstruct(&runs, RunKind::Added), old);
        assert_eq!(reconstruct(&runs, RunKind::Removed), new);
        let stats = summarize(&runs);
        assert_eq!((stats.additions, stats.deletions, stats.unchanged), (2, 2, 0));
    }

    #[test]
    fn mixed_line_endings_only_mark_the_differing_line() {
        let old = "alpha\nbeta\r\ngamma\n";
        let new = "alpha\nbeta\ngamma\n";
        let runs = diff_lines(old, new);

        assert_eq!(reconstruct(&runs, RunKind::Added), old);
        assert_eq!(reconstruct(&runs, RunKind::Removed), new);
        let changed = runs
            .iter()
            .filter(|run| run.kind != RunKind::Unchanged)
            .map(|run| run.value.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(changed, vec!["beta\r\n", "beta\n"]);
    }

    #[test]
    fn adjacent_changed_lines_are_coalesced() {
        let runs = diff_lines("keep\n", "keep\nnew one\nnew two\n");

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].kind, RunKind::Added);
        assert_eq!(runs[1].value, "new one\nnew two\n");
    }

    #[test]
    fn empty_inputs_produce_no_runs() {
        assert!(diff_lines("", "").is_empty());
        let runs = diff_lines("", "only\n");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].kind, RunKind::Added);
    }

    #[test]
    fn side_by_side_numbers_only_present_lines() {
        let runs = diff_lines("a\nb\nc\n", "a\nc\nd\n");
        let (left, right) = to_side_by_side(&runs);

        assert_eq!(left.len(), right.len());

        let removed_row = left
            .iter()
            .position(|line| line.kind == RunKind::Removed)
            .expect("removed line present");
        assert_eq!(left[removed_row].text, "b");
        assert_eq!(left[removed_row].number, Some(2));
        assert!(right[removed_row].placeholder);
        assert_eq!(right[removed_row].number, None);

        let added_row = right
            .iter()
            .position(|line| line.kind == RunKind::Added)
            .expect("added line present");
        assert_eq!(right[added_row].text, "d");
        assert_eq!(right[added_row].number, Some(3));
        assert!(left[added_row].placeholder);

        let left_numbers = left.iter().filter_map(|line| line.number).collect::<Vec<usize>>();
        assert_eq!(left_numbers, vec![1, 2, 3]);
    }

    #[test]
    fn unified_numbers_unchanged_lines_only() {
        let runs = diff_lines("a\nb\nc\n", "a\nx\nc\n");
        let rendered = to_unified(&runs)
            .iter()
            .map(|line| format!("{} {}", line.marker, line.text))
            .collect::<Vec<String>>();

        assert_eq!(rendered, vec!["1 a", "- b", "+ x", "2 c"]);
    }

    #[test]
    fn page_number_shift_vanishes_after_preparation() {
        let mut old = String::from("A BILL\nBe it enacted by the Senate and House,\n");
        let mut new = old.clone();
        for number in 1..=6 {
            old.push_str(&format!("SEC. {number}. HEADING {number}.\nText of section {number}.\n"));
            new.push_str(&format!("SEC. {number}. HEADING {number}.\nText of section {number}.\n"));
        }
        old.push_str("12\nThe Commission shall issue rules within 180 days.\nClosing text.\n");
        new.push_str("13\nThe Commission shall issue rules within 270 days.\nClosing text.\n");

        let normalizer = BillTextNormalizer::new().expect("normalizer regexes compile");
        let runs = diff_lines(
            &normalizer.prepare_for_diff(&old),
            &normalizer.prepare_for_diff(&new),
        );

        let removed = runs.iter().filter(|run| run.kind == RunKind::Removed).collect::<Vec<&DiffRun>>();
        let added = runs.iter().filter(|run| run.kind == RunKind::Added).collect::<Vec<&DiffRun>>();
        assert_eq!(removed.len(), 1);
        assert_eq!(added.len(), 1);
        assert_eq!(removed[0].value, "The Commission shall issue rules within 180 days.\n");
        assert_eq!(added[0].value, "The Commission shall issue rules within 270 days.\n");

        let stats = summarize(&runs);
        assert_eq!((stats.additions, stats.deletions), (1, 1));
    }

    fn bill_text() -> impl Strategy<Value = String> {
        (
            prop::collection::vec(
                ("[a-c ]{0,4}", prop_oneof![Just("\n"), Just("\r\n")]),
                0..12,
            ),
            any::<bool>(),
        )
            .prop_map(|(lines, drop_final_terminator)| {
                let mut text = lines
                    .iter()
                    .map(|(content, ending)| format!("{content}{ending}"))
                    .collect::<String>();
                if drop_final_terminator {
                    let ending = if text.ends_with("\r\n") { 2 } else { usize::from(text.ends_with('\n')) };
                    text.truncate(text.len() - ending);
                }
                text
            })
    }

    proptest! {
        #[test]
        fn self_diff_has_no_changes(text in bill_text()) {
            let stats = summarize(&diff_lines(&text, &text));
            let non_empty = text.lines().filter(|line| !line.is_empty()).count();

            prop_assert_eq!(stats.additions, 0);
            prop_assert_eq!(stats.deletions, 0);
            prop_assert_eq!(stats.unchanged, non_empty);
        }

        #[test]
        fn runs_rebuild_either_side(old in bill_text(), new in bill_text()) {
            let runs = diff_lines(&old, &new);

            prop_assert_eq!(reconstruct(&runs, RunKind::Added), old);
            prop_assert_eq!(reconstruct(&runs, RunKind::Removed), new);
        }
    }
}
