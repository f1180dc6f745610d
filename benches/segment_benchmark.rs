//! Benchmarks for unsection segmentation and rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic tabbed documents.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unsection::{
    convert::{convert_document, render_sections, ConvertOptions},
    detect_export_format, segment_document, Document, ListInfo, Paragraph, RenderOptions,
    SubDocument, Table, TextRun,
};

/// Creates a tabbed document with `tab_count` tabs of mixed content.
fn create_test_document(tab_count: usize) -> Document {
    let tabs = (0..tab_count)
        .map(|t| {
            let mut tab = SubDocument::titled(format!("Tab {}", t + 1));
            for s in 0..10 {
                tab.add_paragraph(Paragraph::heading(format!("Heading {}.{}", t, s), 2));
                tab.add_paragraph(
                    Paragraph::with_text("Plain text then ")
                        .with_run(TextRun::bold("bold"))
                        .with_run(TextRun::link(" a link", "https://example.com")),
                );
                tab.add_paragraph(Paragraph::list_item("first", ListInfo::bullet(0)));
                tab.add_paragraph(Paragraph::list_item("nested", ListInfo::numbered(1)));
                tab.add_table(Table::from_rows(vec![
                    vec!["Name", "Value"],
                    vec!["alpha", "1"],
                    vec!["beta", "2"],
                ]));
            }
            tab
        })
        .collect();
    Document::tabbed("Benchmark", tabs)
}

/// Benchmark segmentation at various sizes.
fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");

    for tab_count in [1, 10, 50].iter() {
        let doc = create_test_document(*tab_count);

        group.bench_function(format!("{}_tabs", tab_count), |b| {
            b.iter(|| segment_document(black_box(&doc)));
        });
    }

    group.finish();
}

/// Benchmark parallel versus sequential page rendering.
fn bench_rendering(c: &mut Criterion) {
    let sections = segment_document(&create_test_document(50));
    let mut group = c.benchmark_group("rendering");

    group.bench_function("parallel", |b| {
        let options = RenderOptions::default();
        b.iter(|| render_sections(black_box(&sections), &options));
    });

    group.bench_function("sequential", |b| {
        let options = RenderOptions::default().sequential();
        b.iter(|| render_sections(black_box(&sections), &options));
    });

    group.finish();
}

/// Benchmark the full conversion pipeline.
fn bench_convert(c: &mut Criterion) {
    let doc = create_test_document(10);
    c.bench_function("convert_10_tabs", |b| {
        b.iter(|| convert_document(black_box(&doc), &ConvertOptions::default()).unwrap());
    });
}

/// Benchmark export format sniffing.
fn bench_format_detection(c: &mut Criterion) {
    let html = "<!DOCTYPE html><html><body><p>text</p></body></html>";
    let text = "Just some plain text exported from a document";

    c.bench_function("detect_html", |b| {
        b.iter(|| detect_export_format(black_box(html)));
    });

    c.bench_function("detect_text", |b| {
        b.iter(|| detect_export_format(black_box(text)));
    });
}

criterion_group!(
    benches,
    bench_segmentation,
    bench_rendering,
    bench_convert,
    bench_format_detection,
);
criterion_main!(benches);
