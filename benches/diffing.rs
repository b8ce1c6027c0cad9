//! Benchmarks for the diff and markup pipeline.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use markdiff::diff::{Granularity, diff_with};
use markdiff::markdown::render_html;
use markdiff::markup::annotate;

fn sample_document(paragraphs: usize) -> String {
    let mut md = String::from("# Release notes\n\n");
    for i in 0..paragraphs {
        md.push_str(&format!(
            "## Section {i}\n\nThe quick brown fox jumps over the lazy dog {i} times.\n\
             - item one\n- item two with `code`\n\n| a | b |\n|---|---|\n| {i} | x |\n\n"
        ));
    }
    md
}

fn edited(text: &str) -> String {
    text.replace("quick", "slow").replace("lazy", "sleepy")
}

fn bench_diff_small(c: &mut Criterion) {
    let original = "The cat sat on the mat.";
    let modified = "The dog sat on the red mat.";
    c.bench_function("diff_small", |b| {
        b.iter(|| diff_with(black_box(original), black_box(modified), Granularity::Word));
    });
}

fn bench_diff_document(c: &mut Criterion) {
    let original = sample_document(50);
    let modified = edited(&original);
    for granularity in [Granularity::Word, Granularity::Line, Granularity::Char] {
        c.bench_function(&format!("diff_document_{}", granularity.as_str()), |b| {
            b.iter(|| diff_with(black_box(&original), black_box(&modified), granularity));
        });
    }
}

fn bench_annotate_and_render(c: &mut Criterion) {
    let original = sample_document(50);
    let modified = edited(&original);
    c.bench_function("annotate_render_html", |b| {
        b.iter(|| {
            let annotated = annotate(black_box(&original), black_box(&modified), Granularity::Word);
            render_html(&annotated)
        });
    });
}

criterion_group!(
    benches,
    bench_diff_small,
    bench_diff_document,
    bench_annotate_and_render
);
criterion_main!(benches);
