//! Serializes edit spans into Markdown with embedded diff markup.
//!
//! Added text is wrapped in `<ins>` and removed text in `<del>`. Every
//! wrapper carries both a class (for themed in-app display) and an inline
//! style (so the highlight survives being pasted somewhere without our
//! stylesheet):
//!
//! ```
//! use markdiff::diff::diff;
//! use markdiff::markup::render;
//!
//! let out = render(&diff("The cat sat.", "The dog sat."));
//! assert!(out.starts_with("The <del class=\"diff-removed\" style=\""));
//! assert!(out.contains(">cat</del><ins class=\"diff-added\" style=\""));
//! assert!(out.ends_with(">dog</ins> sat."));
//! ```
//!
//! Wrappers never span a line break or a table cell delimiter, leave
//! block markers at the start of a line outside, and are never placed
//! inside code or a link destination where the downstream renderer
//! would show them literally. Edits to the structure itself (heading
//! levels, list markers, table delimiter rows) are emitted as the
//! modified text without wrappers.

mod code;

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::diff::{EditSpan, Granularity, SpanKind, diff_with};
use crate::markdown::render_html;
use code::{CodeContext, is_fence_line};

/// Drafts rendered before every remaining wrapper is dropped.
const MAX_PASSES: usize = 8;

/// Leading indentation plus any heading, quote, bullet, task or ordered list markers.
static BLOCK_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[ \t]*(?:>[ \t]?|#{1,6}(?:[ \t]+|$)|[-*+][ \t]+(?:\[[ xX]\][ \t]+)?|\d{1,9}[.)][ \t]+))*[ \t]*",
    )
    .expect("block prefix pattern is valid")
});

/// A line holding nothing but (possibly incomplete) block markers.
static PARTIAL_BLOCK_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[ \t]*(?:>|#{1,6}|[-*+](?:[ \t]+\[(?:[ xX]\]?)?)?|\d{1,9}[.)]?|=+))*[ \t]*$")
        .expect("partial block prefix pattern is valid")
});

/// Start of a table delimiter row, up to and including a partial cell.
static DELIMITER_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*\|?(?:[ \t]*:?-+:?[ \t]*\|)*[ \t]*:?-*$")
        .expect("delimiter row pattern is valid")
});

static DELIMITER_CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*(?::?-+:?|:)[ \t]*$").expect("delimiter cell pattern is valid")
});

/// An inline link whose destination is still open on this line.
static LINK_DESTINATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\]\(<?[^\s()<>]*$").expect("link destination pattern is valid")
});

/// Class names and inline declarations used for diff wrappers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupTheme {
    pub added_class: String,
    pub added_style: String,
    pub removed_class: String,
    pub removed_style: String,
}

impl Default for MarkupTheme {
    fn default() -> Self {
        Self {
            added_class: "diff-added".to_string(),
            added_style: "background-color:#fef08a;color:#713f12;border-radius:3px;\
                          padding:0 2px;text-decoration:none"
                .to_string(),
            removed_class: "diff-removed".to_string(),
            removed_style: "background-color:#fee2e2;color:#7f1d1d;border-radius:3px;\
                            padding:0 2px;text-decoration:line-through;\
                            text-decoration-color:#ef4444"
                .to_string(),
        }
    }
}

impl MarkupTheme {
    fn wrapper(&self, kind: SpanKind) -> Option<(&'static str, &str, &str)> {
        match kind {
            SpanKind::Added => Some(("ins", &self.added_class, &self.added_style)),
            SpanKind::Removed => Some(("del", &self.removed_class, &self.removed_style)),
            SpanKind::Unchanged => None,
        }
    }
}

/// Render spans with the default theme.
pub fn render(spans: &[EditSpan]) -> String {
    render_with(spans, &MarkupTheme::default())
}

/// Render spans into annotated Markdown.
///
/// Each draft is rendered to HTML and any span whose wrapper would come
/// out as literal text (inside a code span, a link title, after an
/// escaping backslash) is emitted without wrappers in the next draft.
pub fn render_with(spans: &[EditSpan], theme: &MarkupTheme) -> String {
    if !spans.iter().any(EditSpan::is_change) {
        return spans.iter().map(|span| span.text.as_str()).collect();
    }
    let follow = following_chars(spans);
    let mut plain = vec![false; spans.len()];
    for pass in 0..MAX_PASSES {
        let draft = MarkupWriter::new(theme, true).write(spans, &plain, &follow);
        if draft.wrapped.iter().all(|count| *count == 0) {
            return draft.out;
        }
        let html = render_html(&draft.out);
        let shown_as_text = draft.shown_as_text(spans, &html);
        if shown_as_text.is_empty() {
            return MarkupWriter::new(theme, false)
                .write(spans, &plain, &follow)
                .out;
        }
        tracing::debug!(
            pass,
            spans = shown_as_text.len(),
            "unwrapping spans the renderer shows as text"
        );
        for index in shown_as_text {
            plain[index] = true;
        }
    }
    plain.fill(true);
    MarkupWriter::new(theme, false)
        .write(spans, &plain, &follow)
        .out
}

/// Diff two texts and render the result in one step.
pub fn annotate(original: &str, modified: &str, granularity: Granularity) -> String {
    render(&diff_with(original, modified, granularity))
}

/// CSS rules matching the wrapper classes, for pages that embed the markup.
pub fn stylesheet(theme: &MarkupTheme) -> String {
    format!(
        "ins.{} {{ {}; }}\ndel.{} {{ {}; }}\n",
        theme.added_class, theme.added_style, theme.removed_class, theme.removed_style
    )
}

/// For each span, the first non-digit char of the modified text after it.
fn following_chars(spans: &[EditSpan]) -> Vec<Option<char>> {
    let mut next = None;
    let mut follow = vec![None; spans.len()];
    for (index, span) in spans.iter().enumerate().rev() {
        follow[index] = next;
        if span.kind != SpanKind::Removed
            && let Some(ch) = span.text.chars().find(|c| !c.is_ascii_digit())
        {
            next = Some(ch);
        }
    }
    follow
}

struct MarkupWriter<'a> {
    theme: &'a MarkupTheme,
    out: String,
    code: CodeContext,
    /// Which side opened the current code block, if a change did
    code_owner: Option<SpanKind>,
    /// Label wrappers with their span index so they can be found in HTML
    labeled: bool,
    span: usize,
    /// Wrappers emitted per span
    wrapped: Vec<usize>,
}

impl<'a> MarkupWriter<'a> {
    fn new(theme: &'a MarkupTheme, labeled: bool) -> Self {
        Self {
            theme,
            out: String::new(),
            code: CodeContext::default(),
            code_owner: None,
            labeled,
            span: 0,
            wrapped: Vec::new(),
        }
    }

    fn write(mut self, spans: &[EditSpan], plain: &[bool], follow: &[Option<char>]) -> Self {
        self.wrapped = vec![0; spans.len()];
        for (index, span) in spans.iter().enumerate() {
            self.span = index;
            self.leave_closed_fence(&span.text);
            match span.kind {
                SpanKind::Unchanged => self.raw(&span.text),
                SpanKind::Added if plain[index] => self.raw(&span.text),
                SpanKind::Removed if plain[index] => {}
                kind => self.change(&span.text, kind, follow[index]),
            }
        }
        self
    }

    /// Spans with a wrapper that did not reach `html` as markup.
    fn shown_as_text(&self, spans: &[EditSpan], html: &str) -> Vec<usize> {
        self.wrapped
            .iter()
            .enumerate()
            .filter(|&(index, &count)| {
                let Some((tag, _, _)) = self.theme.wrapper(spans[index].kind) else {
                    return false;
                };
                count > 0
                    && (html.matches(&open_label(tag, index)).count() < count
                        || html.matches(&close_label(tag, index)).count() < count)
            })
            .map(|(index, _)| index)
            .collect()
    }

    fn raw(&mut self, text: &str) {
        self.out.push_str(text);
        self.code.feed(text);
    }

    fn at_line_start(&self) -> bool {
        self.out.is_empty() || self.out.ends_with('\n')
    }

    /// Text on the line of a just-closed fence would keep the block open.
    fn leave_closed_fence(&mut self, next: &str) {
        if let Some(marker) = self.code.closing_fence_marker()
            && !next.is_empty()
            && !next.starts_with(['\n', marker])
        {
            self.raw("\n");
        }
    }

    /// Inside code only one side can be shown: the side that opened the
    /// block, or the modified text when the block is unchanged.
    fn in_code(&mut self) -> bool {
        let in_code = self.code.in_code();
        if !in_code {
            self.code_owner = None;
        }
        in_code
    }

    fn shown_in_code(&self, kind: SpanKind) -> bool {
        kind == self.code_owner.unwrap_or(SpanKind::Added)
    }

    fn change(&mut self, text: &str, kind: SpanKind, follow: Option<char>) {
        let mut rest = text;
        while !rest.is_empty() {
            let end = match rest.find(['\n', '|']) {
                Some(0) => 1,
                Some(i) => i,
                None => rest.len(),
            };
            let (piece, tail) = rest.split_at(end);
            if piece == "\n" || piece == "|" {
                self.delimiter(piece, kind);
            } else {
                self.segment(piece, kind, tail.chars().next().or(follow));
            }
            rest = tail;
        }
    }

    fn delimiter(&mut self, piece: &str, kind: SpanKind) {
        if self.in_code() && !self.shown_in_code(kind) {
            return;
        }
        self.raw(piece);
    }

    /// Emit one piece of a change that holds no line break or cell delimiter.
    fn segment(&mut self, piece: &str, kind: SpanKind, next: Option<char>) {
        if self.in_code() {
            if self.shown_in_code(kind) {
                self.raw(piece);
            }
            return;
        }
        if self.at_line_start() && is_fence_line(piece) {
            self.code_owner = Some(kind);
            self.raw(piece);
            return;
        }
        if self.is_delimiter_cell(piece, next) {
            self.raw(piece);
            return;
        }
        if self.is_marker_edit(piece, next) {
            if kind == SpanKind::Added {
                self.raw(piece);
            }
            return;
        }

        let mut body = piece;
        if self.at_line_start() {
            let prefix = BLOCK_PREFIX.find(body).map_or(0, |m| m.end());
            if prefix > 0 {
                self.raw(&body[..prefix]);
                body = &body[prefix..];
                if self.in_code() {
                    if self.code.opens_indented_block() {
                        self.code_owner = Some(kind);
                    }
                    if self.shown_in_code(kind) {
                        self.raw(body);
                    }
                    return;
                }
            }
        }
        self.inline(body, kind);
    }

    /// Emit text within a line, keeping link destinations unwrapped.
    fn inline(&mut self, body: &str, kind: SpanKind) {
        if body.is_empty() {
            return;
        }
        let line = self.code.line();
        let in_destination = LINK_DESTINATION.is_match(line)
            || (line.ends_with(']') && body.starts_with('('));
        if !in_destination || body.starts_with(char::is_whitespace) {
            self.wrap(body, kind);
            return;
        }
        // the destination runs to the closing paren or the title
        let end = if body.starts_with(')') {
            1
        } else {
            body.char_indices()
                .skip(1)
                .find(|&(_, c)| c == ')' || c.is_whitespace())
                .map_or(body.len(), |(i, c)| if c == ')' { i + 1 } else { i })
        };
        let (target, after) = body.split_at(end);
        if kind == SpanKind::Added {
            self.raw(target);
        }
        self.inline(after, kind);
    }

    /// A cell of a table delimiter row such as `|:---|`.
    fn is_delimiter_cell(&self, piece: &str, next: Option<char>) -> bool {
        let line = self.code.line();
        DELIMITER_CELL.is_match(piece)
            && DELIMITER_ROW.is_match(line)
            && (line.contains('|') || next == Some('|'))
    }

    /// An edit to the heading, list or quote markers at the start of a line.
    fn is_marker_edit(&self, piece: &str, next: Option<char>) -> bool {
        let candidate = format!("{}{piece}", self.code.line());
        if !PARTIAL_BLOCK_PREFIX.is_match(&candidate) {
            return false;
        }
        // digits only count as a marker when the list delimiter follows
        !piece.ends_with(|c: char| c.is_ascii_digit()) || matches!(next, Some('.' | ')'))
    }

    fn wrap(&mut self, body: &str, kind: SpanKind) {
        let Some((tag, class, style)) = self.theme.wrapper(kind) else {
            self.raw(body);
            return;
        };
        let mut element = String::with_capacity(body.len() + style.len() + 96);
        if self.labeled {
            element.push_str(open_label(tag, self.span).trim_end());
        } else {
            let _ = write!(element, "<{tag}");
        }
        let _ = write!(
            element,
            " class=\"{}\" style=\"{}\">{body}",
            escape_attr(class),
            escape_attr(style)
        );
        if self.labeled {
            element.push_str(&close_label(tag, self.span));
        } else {
            let _ = write!(element, "</{tag}>");
        }
        self.wrapped[self.span] += 1;
        self.raw(&element);
    }
}

fn open_label(tag: &str, index: usize) -> String {
    format!("<{tag} data-diff-span=\"{index}\" ")
}

fn close_label(tag: &str, index: usize) -> String {
    format!("</{tag}><span data-diff-end=\"{index}\"></span>")
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff;

    fn ins(text: &str) -> String {
        let theme = MarkupTheme::default();
        format!(
            "<ins class=\"diff-added\" style=\"{}\">{text}</ins>",
            theme.added_style
        )
    }

    fn del(text: &str) -> String {
        let theme = MarkupTheme::default();
        format!(
            "<del class=\"diff-removed\" style=\"{}\">{text}</del>",
            theme.removed_style
        )
    }

    #[test]
    fn test_word_change_is_wrapped_in_del_then_ins() {
        let out = render(&diff("The cat sat.", "The dog sat."));
        assert_eq!(out, format!("The {}{} sat.", del("cat"), ins("dog")));
    }

    #[test]
    fn test_identical_inputs_render_without_wrappers() {
        let text = "# Heading\n\nSome *emphasis* and `code`.\n";
        let out = render(&diff(text, text));
        assert_eq!(out, text);
        assert!(!out.contains("<ins") && !out.contains("<del"));
    }

    #[test]
    fn test_empty_spans_render_empty() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_wrappers_carry_class_and_inline_style() {
        let out = render(&[EditSpan::added("new"), EditSpan::removed("old")]);
        assert!(out.contains("class=\"diff-added\""));
        assert!(out.contains("style=\"background-color:#fef08a"));
        assert!(out.contains("class=\"diff-removed\""));
        assert!(out.contains("text-decoration:line-through"));
    }

    #[test]
    fn test_wrappers_do_not_cross_line_breaks() {
        let out = render(&[
            EditSpan::unchanged("Intro "),
            EditSpan::added("first\nsecond"),
        ]);
        assert_eq!(out, format!("Intro {}\n{}", ins("first"), ins("second")));
    }

    #[test]
    fn test_blank_lines_inside_change_stay_raw() {
        let out = render(&[EditSpan::added("one\n\ntwo")]);
        assert_eq!(out, format!("{}\n\n{}", ins("one"), ins("two")));
    }

    #[test]
    fn test_heading_marker_stays_outside_wrapper() {
        let out = render(&[
            EditSpan::unchanged("intro\n\n"),
            EditSpan::added("## New section"),
        ]);
        assert_eq!(out, format!("intro\n\n## {}", ins("New section")));
    }

    #[test]
    fn test_list_and_task_markers_stay_outside_wrapper() {
        let out = render(&[
            EditSpan::unchanged("* keep\n"),
            EditSpan::added("*   added item\n- [x] done"),
        ]);
        assert_eq!(
            out,
            format!("* keep\n*   {}\n- [x] {}", ins("added item"), ins("done"))
        );
    }

    #[test]
    fn test_ordered_and_quoted_prefixes() {
        let out = render(&[EditSpan::removed("  12. step\n> - quoted")]);
        assert_eq!(out, format!("  12. {}\n> - {}", del("step"), del("quoted")));
    }

    #[test]
    fn test_emphasis_marker_is_not_a_bullet() {
        let out = render(&[EditSpan::added("**bold** text")]);
        assert_eq!(out, ins("**bold** text"));
    }

    #[test]
    fn test_wrappers_do_not_cross_table_cells() {
        let out = render(&[
            EditSpan::unchanged("| a | "),
            EditSpan::removed("b | c"),
            EditSpan::added("x | y"),
            EditSpan::unchanged(" |"),
        ]);
        assert_eq!(
            out,
            format!(
                "| a | {}|{}{}|{} |",
                del("b "),
                del(" c"),
                ins("x "),
                ins(" y")
            )
        );
    }

    #[test]
    fn test_change_inside_inline_code_shows_new_text_only() {
        let out = render(&diff("Run `cargo build` now", "Run `cargo test` now"));
        assert_eq!(out, "Run `cargo test` now");
    }

    #[test]
    fn test_change_inside_fenced_block_shows_new_text_only() {
        let original = "```rust\nlet x = 1;\n```\n";
        let modified = "```rust\nlet x = 2;\n```\n";
        let out = render(&diff(original, modified));
        assert_eq!(out, modified);
    }

    #[test]
    fn test_added_code_block_is_emitted_raw() {
        let block = "```sh\necho hi | tee out\n```\n";
        let out = render(&[EditSpan::unchanged("text\n\n"), EditSpan::added(block)]);
        assert_eq!(out, format!("text\n\n{block}"));
    }

    #[test]
    fn test_removed_code_block_is_emitted_raw() {
        let block = "~~~\nold();\n~~~\n";
        let out = render(&[
            EditSpan::unchanged("text\n\n"),
            EditSpan::removed(block),
            EditSpan::added("New paragraph."),
        ]);
        assert_eq!(out, format!("text\n\n{block}{}", ins("New paragraph.")));
    }

    #[test]
    fn test_lone_backtick_is_wrapped_as_text() {
        let out = render(&[
            EditSpan::unchanged("a "),
            EditSpan::added("`"),
            EditSpan::unchanged("b"),
        ]);
        assert_eq!(out, format!("a {}b", ins("`")));
        let out = render(&[
            EditSpan::unchanged("a "),
            EditSpan::removed("`"),
            EditSpan::unchanged("b"),
        ]);
        assert_eq!(out, format!("a {}b", del("`")));
    }

    #[test]
    fn test_stray_backtick_does_not_hide_later_changes() {
        let out = render(&diff(
            "It's a ` tick. The cat sat.",
            "It's a ` tick. The dog sat.",
        ));
        assert!(out.contains(&del("cat")), "{out}");
        assert!(out.contains(&ins("dog")), "{out}");
    }

    #[test]
    fn test_backtick_that_opens_a_span_with_later_text_is_not_wrapped() {
        let out = render(&[
            EditSpan::unchanged("a "),
            EditSpan::added("`x"),
            EditSpan::unchanged(" b ` c"),
        ]);
        assert_eq!(out, "a `x b ` c");
    }

    #[test]
    fn test_text_after_a_removed_fenced_block_is_shown() {
        let out = render(&diff("```\nfoo bar\n```", "foo baz"));
        assert!(out.contains(&ins("baz")), "{out}");
        assert!(out.contains("```\n"), "{out}");
    }

    #[test]
    fn test_text_on_the_line_after_unchanged_closing_fence() {
        let out = render(&diff("```\nx\n```\nA", "```\nx\n```B"));
        assert_eq!(out, format!("```\nx\n```\n{}", ins("B")));
    }

    #[test]
    fn test_added_indented_code_block_is_emitted_raw() {
        let out = annotate("Para.\n", "Para.\n\n    let x = 1;\n", Granularity::Word);
        assert!(out.ends_with("\n\n    let x = 1;\n"), "{out}");
        assert!(!out.contains("<ins") && !out.contains("<del"), "{out}");
    }

    #[test]
    fn test_change_inside_indented_block_shows_new_text_only() {
        let modified = "Para.\n\n    let x = 2;\n";
        let out = annotate("Para.\n\n    let x = 1;\n", modified, Granularity::Word);
        assert_eq!(out, modified);
    }

    #[test]
    fn test_removed_indented_block_is_emitted_raw() {
        let out = render(&[
            EditSpan::unchanged("Para.\n\n"),
            EditSpan::removed("    old();\n"),
        ]);
        assert_eq!(out, "Para.\n\n    old();\n");
    }

    #[test]
    fn test_indented_continuation_line_is_still_wrapped() {
        let out = render(&[
            EditSpan::unchanged("Para.\n"),
            EditSpan::added("    more"),
        ]);
        assert_eq!(out, format!("Para.\n    {}", ins("more")));
    }

    #[test]
    fn test_table_delimiter_row_is_not_wrapped() {
        let table = "| a | b |\n|---|:--|\n| 1 | 2 |\n";
        let out = render(&[EditSpan::unchanged("Intro\n\n"), EditSpan::added(table)]);
        assert!(out.contains("\n|---|:--|\n"), "{out}");
        assert!(out.contains(&ins(" a ")), "{out}");
    }

    #[test]
    fn test_alignment_edit_in_delimiter_row_is_raw() {
        let out = annotate(
            "| a |\n|---|\n| 1 |\n",
            "| a |\n|:---:|\n| 1 |\n",
            Granularity::Word,
        );
        assert_eq!(out, "| a |\n|:---:|\n| 1 |\n");
    }

    #[test]
    fn test_heading_level_change_keeps_new_level() {
        let out = annotate("# Title\n", "## Title\n", Granularity::Word);
        assert_eq!(out, "## Title\n");
        let out = annotate("### Title\n", "# Title\n", Granularity::Word);
        assert_eq!(out, "# Title\n");
    }

    #[test]
    fn test_list_marker_change_keeps_new_marker() {
        assert_eq!(
            annotate("- item\n", "* item\n", Granularity::Word),
            "* item\n"
        );
        assert_eq!(
            annotate("1. step\n", "2. step\n", Granularity::Word),
            "2. step\n"
        );
        assert_eq!(
            annotate("- [ ] task\n", "- [x] task\n", Granularity::Word),
            "- [x] task\n"
        );
    }

    #[test]
    fn test_leading_number_in_prose_is_still_wrapped() {
        let out = annotate("2019 was good\n", "2020 was good\n", Granularity::Word);
        assert_eq!(out, format!("{}{} was good\n", del("2019"), ins("2020")));
    }

    #[test]
    fn test_link_destination_edit_is_raw() {
        let out = annotate(
            "[docs](http://a.com/old)",
            "[docs](http://a.com/new)",
            Granularity::Word,
        );
        assert_eq!(out, "[docs](http://a.com/new)");
    }

    #[test]
    fn test_link_text_edit_is_wrapped() {
        let out = annotate(
            "[old docs](http://a.com)",
            "[new docs](http://a.com)",
            Granularity::Word,
        );
        assert_eq!(out, format!("[{}{} docs](http://a.com)", del("old"), ins("new")));
    }

    #[test]
    fn test_wrapper_after_backslash_is_dropped() {
        let out = render(&[EditSpan::unchanged("a \\"), EditSpan::added("b")]);
        assert_eq!(out, "a \\b");
    }

    #[test]
    fn test_balanced_code_span_inside_change_is_wrapped() {
        let out = render(&[EditSpan::added("use `x` here")]);
        assert_eq!(out, ins("use `x` here"));
    }

    #[test]
    fn test_unchanged_text_is_never_escaped() {
        let text = "<b>raw</b> & [link](http://x) \\*";
        let out = render(&[EditSpan::unchanged(text), EditSpan::added("!")]);
        assert!(out.starts_with(text));
    }

    #[test]
    fn test_render_is_deterministic() {
        let spans = diff("alpha beta gamma", "alpha delta gamma epsilon");
        assert_eq!(render(&spans), render(&spans));
    }

    #[test]
    fn test_custom_theme_attributes_are_escaped() {
        let theme = MarkupTheme {
            added_class: "a\"b".to_string(),
            ..MarkupTheme::default()
        };
        let out = render_with(&[EditSpan::added("x")], &theme);
        assert!(out.starts_with("<ins class=\"a&quot;b\""));
    }

    #[test]
    fn test_annotate_uses_requested_granularity() {
        let out = annotate("ab", "ac", Granularity::Char);
        assert_eq!(out, format!("a{}{}", del("b"), ins("c")));
    }

    #[test]
    fn test_stylesheet_lists_both_classes() {
        let css = stylesheet(&MarkupTheme::default());
        assert!(css.contains("ins.diff-added {"));
        assert!(css.contains("del.diff-removed {"));
    }
}
