use markdiff::clipboard::ClipboardPayload;
use markdiff::diff::{self, Granularity, SpanKind};
use markdiff::markdown::{export_page, render_html};
use markdiff::markup::{self, MarkupTheme};

#[test]
fn test_word_edit_end_to_end() {
    let spans = diff::diff("The cat sat.", "The dog sat.");
    let kinds: Vec<SpanKind> = spans.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SpanKind::Unchanged,
            SpanKind::Removed,
            SpanKind::Added,
            SpanKind::Unchanged
        ]
    );

    let annotated = markup::render(&spans);
    let html = render_html(&annotated);
    assert!(html.contains("<del class=\"diff-removed\""));
    assert!(html.contains(">cat</del>"));
    assert!(html.contains(">dog</ins>"));
}

#[test]
fn test_identical_texts_produce_no_markup() {
    let text = "# Title\n\n- one\n- two\n";
    let annotated = markup::annotate(text, text, Granularity::Word);
    assert_eq!(annotated, text);
    assert!(!render_html(&annotated).contains("<ins"));
}

#[test]
fn test_heading_marker_stays_outside_wrapper() {
    let annotated = markup::annotate("# Old title\n", "# New title\n", Granularity::Word);
    let html = render_html(&annotated);
    assert!(html.starts_with("<h1>"));
    assert!(html.contains(">New</ins> title</h1>"));
}

#[test]
fn test_added_list_item_renders_as_list() {
    let annotated = markup::annotate("- one\n", "- one\n- two\n", Granularity::Word);
    let html = render_html(&annotated);
    assert!(html.contains("<ul>"));
    assert!(html.contains(">two</ins>"));
}

#[test]
fn test_table_cells_keep_their_pipes() {
    let original = "| a | b |\n|---|---|\n| 1 | 2 |\n";
    let modified = "| a | b |\n|---|---|\n| 1 | 3 |\n";
    let html = render_html(&markup::annotate(original, modified, Granularity::Word));
    assert!(html.contains("<table>"));
    assert!(html.contains(">3</ins>"));
}

#[test]
fn test_code_block_contents_are_not_wrapped() {
    let original = "```\nlet x = 1;\n```\n";
    let modified = "```\nlet x = 2;\n```\n";
    let annotated = markup::annotate(original, modified, Granularity::Word);
    let html = render_html(&annotated);
    assert!(!html.contains("&lt;ins"));
    assert!(!html.contains("&lt;del"));
    assert!(html.contains("let x = 2;"));
    assert!(!html.contains("let x = 1;"));
}

#[test]
fn test_round_trip_through_spans() {
    let original = "Alpha beta.\n\nGamma delta epsilon.";
    let modified = "Alpha beta gamma.\n\nDelta epsilon.";
    for granularity in [Granularity::Word, Granularity::Line, Granularity::Char] {
        let spans = diff::diff_with(original, modified, granularity);
        assert_eq!(diff::original_text(&spans), original);
        assert_eq!(diff::modified_text(&spans), modified);
    }
}

#[test]
fn test_clipboard_payload_and_export_share_markup() {
    let annotated = markup::annotate("one two", "one three", Granularity::Word);
    let payload = ClipboardPayload::from_annotated(&annotated);
    assert_eq!(payload.text, annotated);
    assert_eq!(payload.html, render_html(&annotated));

    let page = export_page("notes.md", &annotated, &MarkupTheme::default());
    assert!(page.contains(&payload.html));
    assert!(page.contains(".diff-added"));
}
