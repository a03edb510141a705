//! Conversion benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tokenweave::{build_document, export_all, ConversionSettings, OutputFormat, Snapshot};

const SNAPSHOT: &str = include_str!("../tests/fixtures/snapshot.json");

fn serialize_snapshot(c: &mut Criterion) {
    let snapshot = Snapshot::from_json_str(SNAPSHOT).unwrap();
    let settings = ConversionSettings::default();
    c.bench_function("serialize_snapshot", |b| {
        b.iter(|| build_document(black_box(&snapshot), black_box(&settings)))
    });
}

fn convert_css(c: &mut Criterion) {
    let snapshot = Snapshot::from_json_str(SNAPSHOT).unwrap();
    let settings = ConversionSettings {
        use_modes_as_selectors: true,
        include_styles: true,
        ..Default::default()
    };
    let document = build_document(&snapshot, &settings).unwrap();
    let converter = OutputFormat::Css.converter();
    c.bench_function("convert_css", |b| {
        b.iter(|| converter.convert(black_box(&document), black_box(&settings)))
    });
}

fn export_every_format(c: &mut Criterion) {
    let snapshot = Snapshot::from_json_str(SNAPSHOT).unwrap();
    let settings = ConversionSettings::default();
    c.bench_function("export_all", |b| {
        b.iter(|| export_all(black_box(&snapshot), black_box(&settings)))
    });
}

criterion_group!(benches, serialize_snapshot, convert_css, export_every_format);
criterion_main!(benches);
