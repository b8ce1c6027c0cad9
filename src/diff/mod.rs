//! Word-level diffing of two texts.
//!
//! This module handles:
//! - Tokenizing text losslessly ([`tokenize`])
//! - Computing an edit script over tokens with `similar`'s Myers diff
//! - Folding the script into ordered [`EditSpan`]s
//!
//! Within each run of changes the removed text is emitted before the
//! added text, so `"The cat sat."` against `"The dog sat."` yields
//! `Unchanged("The ")`, `Removed("cat")`, `Added("dog")`, `Unchanged(" sat.")`.

mod tokenize;

use std::time::{Duration, Instant};

use similar::{Algorithm, DiffTag};

pub use tokenize::tokenize;

/// Past this budget the diff settles for a non-minimal script.
const DIFF_DEADLINE: Duration = Duration::from_millis(500);

/// How text is split into comparison units.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Granularity {
    /// Alphanumeric runs, whitespace runs and single punctuation chars
    #[default]
    Word,
    /// Whole lines including their newline
    Line,
    /// Individual characters
    Char,
}

impl Granularity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Line => "line",
            Self::Char => "char",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "word" => Some(Self::Word),
            "line" => Some(Self::Line),
            "char" => Some(Self::Char),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Unchanged,
    Added,
    Removed,
}

/// A labeled run of text produced by the diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSpan {
    pub text: String,
    pub kind: SpanKind,
}

impl EditSpan {
    pub fn unchanged(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SpanKind::Unchanged,
        }
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SpanKind::Added,
        }
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SpanKind::Removed,
        }
    }

    pub fn is_change(&self) -> bool {
        self.kind != SpanKind::Unchanged
    }
}

/// Diff two texts at word granularity.
pub fn diff(original: &str, modified: &str) -> Vec<EditSpan> {
    diff_with(original, modified, Granularity::Word)
}

/// Diff two texts with an explicit tokenization policy.
pub fn diff_with(original: &str, modified: &str, granularity: Granularity) -> Vec<EditSpan> {
    let old = tokenize(original, granularity);
    let new = tokenize(modified, granularity);
    let deadline = Instant::now() + DIFF_DEADLINE;
    let ops = similar::capture_diff_slices_deadline(Algorithm::Myers, &old, &new, Some(deadline));

    let mut builder = SpanBuilder::default();
    for op in &ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => old[old_range].iter().for_each(|token| builder.equal(token)),
            DiffTag::Delete => builder.remove(&old[old_range]),
            DiffTag::Insert => builder.add(&new[new_range]),
            DiffTag::Replace => {
                builder.remove(&old[old_range]);
                builder.add(&new[new_range]);
            }
        }
    }
    let spans = builder.finish();
    tracing::debug!(
        granularity = granularity.as_str(),
        old_tokens = old.len(),
        new_tokens = new.len(),
        spans = spans.len(),
        "computed diff"
    );
    spans
}

/// Accumulates edits into merged spans, flushing each change run as
/// one removed span followed by one added span.
#[derive(Default)]
struct SpanBuilder {
    spans: Vec<EditSpan>,
    removed: String,
    added: String,
}

impl SpanBuilder {
    fn equal(&mut self, token: &str) {
        self.flush_changes();
        match self.spans.last_mut() {
            Some(last) if last.kind == SpanKind::Unchanged => last.text.push_str(token),
            _ => self.spans.push(EditSpan::unchanged(token)),
        }
    }

    fn remove(&mut self, tokens: &[&str]) {
        tokens.iter().for_each(|token| self.removed.push_str(token));
    }

    fn add(&mut self, tokens: &[&str]) {
        tokens.iter().for_each(|token| self.added.push_str(token));
    }

    fn flush_changes(&mut self) {
        if !self.removed.is_empty() {
            self.spans
                .push(EditSpan::removed(std::mem::take(&mut self.removed)));
        }
        if !self.added.is_empty() {
            self.spans.push(EditSpan::added(std::mem::take(&mut self.added)));
        }
    }

    fn finish(mut self) -> Vec<EditSpan> {
        self.flush_changes();
        self.spans
    }
}

/// Rebuild the original text (everything but added spans).
pub fn original_text(spans: &[EditSpan]) -> String {
    spans
        .iter()
        .filter(|s| s.kind != SpanKind::Added)
        .map(|s| s.text.as_str())
        .collect()
}

/// Rebuild the modified text (everything but removed spans).
pub fn modified_text(spans: &[EditSpan]) -> String {
    spans
        .iter()
        .filter(|s| s.kind != SpanKind::Removed)
        .map(|s| s.text.as_str())
        .collect()
}

/// Summary counts for a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Number of added spans
    pub additions: usize,
    /// Number of removed spans
    pub removals: usize,
    /// Characters in added spans
    pub added_chars: usize,
    /// Characters in removed spans
    pub removed_chars: usize,
}

impl DiffStats {
    pub fn from_spans(spans: &[EditSpan]) -> Self {
        spans.iter().fold(Self::default(), |mut stats, span| {
            match span.kind {
                SpanKind::Added => {
                    stats.additions += 1;
                    stats.added_chars += span.text.chars().count();
                }
                SpanKind::Removed => {
                    stats.removals += 1;
                    stats.removed_chars += span.text.chars().count();
                }
                SpanKind::Unchanged => {}
            }
            stats
        })
    }

    pub const fn is_identical(&self) -> bool {
        self.additions == 0 && self.removals == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_word_substitution_orders_removed_before_added() {
        let spans = diff("The cat sat.", "The dog sat.");
        assert_eq!(
            spans,
            vec![
                EditSpan::unchanged("The "),
                EditSpan::removed("cat"),
                EditSpan::added("dog"),
                EditSpan::unchanged(" sat."),
            ]
        );
    }

    #[test]
    fn test_empty_inputs_yield_no_spans() {
        assert!(diff("", "").is_empty());
    }

    #[test]
    fn test_empty_original_is_single_addition() {
        assert_eq!(diff("", "x"), vec![EditSpan::added("x")]);
    }

    #[test]
    fn test_empty_modified_is_single_removal() {
        assert_eq!(diff("x", ""), vec![EditSpan::removed("x")]);
    }

    #[test]
    fn test_identical_inputs_are_one_unchanged_span() {
        let text = "# Title\n\n* item one\n* item two\n";
        assert_eq!(diff(text, text), vec![EditSpan::unchanged(text)]);
    }

    #[test]
    fn test_fully_disjoint_inputs() {
        let spans = diff("alpha", "omega");
        assert_eq!(
            spans,
            vec![EditSpan::removed("alpha"), EditSpan::added("omega")]
        );
    }

    #[test]
    fn test_appended_sentence() {
        let spans = diff("Hello world.", "Hello world. Bye.");
        assert_eq!(
            spans,
            vec![
                EditSpan::unchanged("Hello world."),
                EditSpan::added(" Bye."),
            ]
        );
    }

    #[test]
    fn test_separate_change_runs_stay_separate() {
        let spans = diff("one two three", "uno two tres");
        assert_eq!(
            spans,
            vec![
                EditSpan::removed("one"),
                EditSpan::added("uno"),
                EditSpan::unchanged(" two "),
                EditSpan::removed("three"),
                EditSpan::added("tres"),
            ]
        );
    }

    #[test]
    fn test_line_granularity_flags_whole_lines() {
        let spans = diff_with("a b\nc d\n", "a b\nc e\n", Granularity::Line);
        assert_eq!(
            spans,
            vec![
                EditSpan::unchanged("a b\n"),
                EditSpan::removed("c d\n"),
                EditSpan::added("c e\n"),
            ]
        );
    }

    #[test]
    fn test_stats_count_changes() {
        let stats = DiffStats::from_spans(&diff("The cat sat.", "The dog sat down."));
        assert_eq!(stats.removals, 1);
        assert_eq!(stats.additions, 2);
        assert!(!stats.is_identical());
        assert!(DiffStats::from_spans(&diff("same", "same")).is_identical());
    }

    #[test]
    fn test_granularity_parse_round_trips_names() {
        for g in [Granularity::Word, Granularity::Line, Granularity::Char] {
            assert_eq!(Granularity::parse(g.as_str()), Some(g));
        }
        assert_eq!(Granularity::parse("sentence"), None);
    }

    #[test]
    fn test_large_rewrite_reconstructs_both_texts() {
        let original: String = (0..4000).map(|i| format!("word{i} ")).collect();
        let modified: String = (0..4000).map(|i| format!("term{} ", i * 7)).collect();
        let spans = diff(&original, &modified);
        assert_eq!(original_text(&spans), original);
        assert_eq!(modified_text(&spans), modified);
    }

    #[test]
    fn test_common_prefix_and_suffix_stay_unchanged() {
        let spans = diff_with("abcXdef", "abcYZdef", Granularity::Char);
        assert_eq!(
            spans,
            vec![
                EditSpan::unchanged("abc"),
                EditSpan::removed("X"),
                EditSpan::added("YZ"),
                EditSpan::unchanged("def"),
            ]
        );
    }

    proptest! {
        #[test]
        fn test_spans_reconstruct_both_texts(
            original in "[a-c .,\n]{0,40}",
            modified in "[a-c .,\n]{0,40}",
        ) {
            for g in [Granularity::Word, Granularity::Line, Granularity::Char] {
                let spans = diff_with(&original, &modified, g);
                prop_assert_eq!(original_text(&spans), original.clone());
                prop_assert_eq!(modified_text(&spans), modified.clone());
            }
        }

        #[test]
        fn test_identity_is_all_unchanged(text in "(\\PC|\n){0,60}") {
            let spans = diff(&text, &text);
            prop_assert!(spans.iter().all(|s| s.kind == SpanKind::Unchanged));
            prop_assert_eq!(modified_text(&spans), text);
        }

        #[test]
        fn test_no_empty_or_adjacent_same_kind_spans(
            original in "[ab ]{0,30}",
            modified in "[ab ]{0,30}",
        ) {
            let spans = diff(&original, &modified);
            prop_assert!(spans.iter().all(|s| !s.text.is_empty()));
            for pair in spans.windows(2) {
                prop_assert_ne!(pair[0].kind, pair[1].kind);
                // an added span is never followed directly by a removed one
                prop_assert!(!(pair[0].kind == SpanKind::Added && pair[1].kind == SpanKind::Removed));
            }
        }
    }
}
