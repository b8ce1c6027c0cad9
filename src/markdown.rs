//! Markdown to HTML rendering with comrak.
//!
//! Raw HTML passthrough is enabled so the `<ins>`/`<del>` wrappers
//! produced by [`crate::markup`] reach the output as markup.

use comrak::{Options, markdown_to_html};

use crate::markup::{MarkupTheme, stylesheet};

/// Render Markdown (with embedded diff markup) to an HTML fragment.
pub fn render_html(markdown: &str) -> String {
    let mut options = Options::default();

    // Enable GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;

    // Diff wrappers are embedded HTML
    options.render.unsafe_ = true;

    markdown_to_html(markdown, &options)
}

const PAGE_CSS: &str = "\
body { font-family: -apple-system, 'Segoe UI', Helvetica, Arial, sans-serif; \
color: #0f172a; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; line-height: 1.6; }
pre, code { background: #f1f5f9; border-radius: 4px; font-size: 0.9em; }
pre { padding: 0.75rem; overflow-x: auto; }
table { border-collapse: collapse; }
th, td { border: 1px solid #cbd5e1; padding: 0.25rem 0.5rem; }
.legend { font-size: 0.8rem; color: #64748b; border-bottom: 1px solid #e2e8f0; padding-bottom: 0.5rem; }
@media print { body { margin: 0; max-width: none; } .legend { display: none; } }
";

/// Build a standalone HTML page for printing or exporting a diff.
pub fn export_page(title: &str, annotated: &str, theme: &MarkupTheme) -> String {
    let body = render_html(annotated);
    let title = escape_text(title);
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>\n{PAGE_CSS}{css}</style>\n</head>\n<body>\n\
         <p class=\"legend\"><del class=\"{removed}\">Removed</del> \
         <ins class=\"{added}\">Added</ins></p>\n{body}</body>\n</html>\n",
        css = stylesheet(theme),
        removed = theme.removed_class,
        added = theme.added_class,
    )
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{EditSpan, Granularity, diff};
    use crate::markup::{annotate, render};
    use proptest::prelude::*;

    fn assert_no_literal_wrappers(html: &str) {
        assert!(!html.contains("&lt;ins"), "wrapper must not be escaped: {html}");
        assert!(!html.contains("&lt;del"), "wrapper must not be escaped: {html}");
    }

    #[test]
    fn test_diff_markup_passes_through_as_html() {
        let html = render_html(&render(&diff("The cat sat.", "The dog sat.")));
        assert!(html.starts_with("<p>The <del class=\"diff-removed\""));
        assert!(html.contains(">dog</ins> sat.</p>"));
        assert!(!html.contains("&lt;ins"), "wrapper must not be escaped: {html}");
        assert!(!html.contains("&lt;del"), "wrapper must not be escaped: {html}");
    }

    #[test]
    fn test_heading_change_keeps_heading_block() {
        let annotated = render(&diff("# Old title\n", "# New title\n"));
        let html = render_html(&annotated);
        assert!(html.starts_with("<h1>"), "got {html}");
        assert!(html.contains("<ins class=\"diff-added\""));
    }

    #[test]
    fn test_list_items_survive_changes() {
        let original = "* one\n* two\n";
        let modified = "* one\n* zwei\n* three\n";
        let html = render_html(&render(&diff(original, modified)));
        assert_eq!(html.matches("<li>").count(), 3, "got {html}");
        assert!(!html.contains("&lt;"), "got {html}");
    }

    #[test]
    fn test_table_cells_keep_their_markup() {
        let original = "| a | b |\n|---|---|\n| 1 | 2 |\n";
        let modified = "| a | b |\n|---|---|\n| 1 | 3 |\n";
        let html = render_html(&render(&diff(original, modified)));
        assert!(html.contains("<table>"), "got {html}");
        assert!(html.contains(">2</del>"));
        assert!(html.contains(">3</ins>"));
    }

    #[test]
    fn test_code_change_leaves_no_literal_tags() {
        let original = "Run `make build` first.\n\n```\nx = 1\n```\n";
        let modified = "Run `make test` first.\n\n```\nx = 2\n```\n";
        let html = render_html(&render(&diff(original, modified)));
        assert!(!html.contains("&lt;"), "got {html}");
        assert!(html.contains("<code>make test</code>"));
    }

    #[test]
    fn test_multiline_insertion_renders_cleanly() {
        let spans = vec![
            EditSpan::unchanged("Intro.\n\n"),
            EditSpan::added("## Added heading\n\nWith a paragraph."),
        ];
        let html = render_html(&render(&spans));
        assert!(html.contains("<h2><ins"), "got {html}");
        assert!(html.contains("<p><ins"), "got {html}");
        assert!(!html.contains("&lt;"), "got {html}");
    }

    #[test]
    fn test_added_indented_code_renders_as_code() {
        let html = render_html(&annotate(
            "Para.\n",
            "Para.\n\n    let x = 1;\n",
            Granularity::Word,
        ));
        assert!(html.contains("<pre><code>let x = 1;"), "got {html}");
        assert_no_literal_wrappers(&html);
    }

    #[test]
    fn test_added_table_renders_as_table() {
        let html = render_html(&annotate(
            "Intro\n",
            "Intro\n\n| a | b |\n|---|---|\n| 1 | 2 |\n",
            Granularity::Word,
        ));
        assert!(html.contains("<table>"), "got {html}");
        assert_no_literal_wrappers(&html);
    }

    #[test]
    fn test_heading_level_change_renders_new_level() {
        let html = render_html(&annotate("# Title\n", "## Title\n", Granularity::Word));
        assert!(html.contains("<h2>"), "got {html}");
    }

    #[test]
    fn test_link_destination_change_keeps_link() {
        let html = render_html(&annotate(
            "[docs](http://a.com/old)",
            "[docs](http://a.com/new)",
            Granularity::Word,
        ));
        assert!(html.contains("<a href=\"http://a.com/new\">docs</a>"), "got {html}");
    }

    #[test]
    fn test_prose_replacing_a_code_block_is_shown() {
        let html = render_html(&render(&diff("```\nfoo bar\n```", "foo baz")));
        assert!(html.contains(">baz</ins>"), "got {html}");
        assert_no_literal_wrappers(&html);
    }

    fn markdown_span() -> impl Strategy<Value = EditSpan> {
        let fragment = prop::sample::select(vec![
            "#", " ", "*", "`", "``", "|", "-", "\n", "\n\n", "    ", "\t", "word", "x", "1.",
            "```", "~~~", ">", ":", "[a](b", ")", "\\", "_",
        ]);
        (0u8..3, prop::collection::vec(fragment, 1..5)).prop_map(|(kind, parts)| {
            let text = parts.concat();
            match kind {
                0 => EditSpan::unchanged(text),
                1 => EditSpan::added(text),
                _ => EditSpan::removed(text),
            }
        })
    }

    proptest! {
        #[test]
        fn test_wrappers_never_render_as_text(
            spans in prop::collection::vec(markdown_span(), 0..12),
        ) {
            let html = render_html(&render(&spans));
            prop_assert!(!html.contains("&lt;ins"), "escaped wrapper in {}", html);
            prop_assert!(!html.contains("&lt;del"), "escaped wrapper in {}", html);
        }

        #[test]
        fn test_real_diffs_never_render_wrappers_as_text(
            original in "[a-c `*#|\n-]{0,40}",
            modified in "[a-c `*#|\n-]{0,40}",
        ) {
            let html = render_html(&annotate(&original, &modified, Granularity::Word));
            prop_assert!(!html.contains("&lt;ins"), "escaped wrapper in {}", html);
            prop_assert!(!html.contains("&lt;del"), "escaped wrapper in {}", html);
        }
    }

    #[test]
    fn test_export_page_embeds_stylesheet_and_body() {
        let annotated = render(&diff("a b", "a c"));
        let page = export_page("Notes <draft>", &annotated, &MarkupTheme::default());
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Notes &lt;draft&gt;</title>"));
        assert!(page.contains("ins.diff-added {"));
        assert!(page.contains("@media print"));
        assert!(page.contains(">c</ins>"));
    }
}
