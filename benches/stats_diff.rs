//! Stats Diff Benchmarks
//!
//! **Purpose:** Measure the diff pipeline on large synthetic stats manifests
//!
//! **How to Run:**
//! ```bash
//! cargo bench --bench stats_diff
//! ```
//!
//! **What's Being Measured:**
//! 1. `compute diff/N` - Name matching and classification of N assets
//! 2. `diff groups` - One diff per default asset group
//! 3. `parse manifest` - JSON parsing and shape resolution
//! 4. `render report` - Markdown rendering with the per-asset breakdown
//!
//! **Performance Notes:**
//! - Matching indexes both lists by name, so the diff is linear in asset count
//! - Group diffs re-run the engine once per enabled group

use bundle_diff::diff::{DiffOptions, StatsDiff};
use bundle_diff::groups::{diff_groups, GroupExtensionLists};
use bundle_diff::manifest::{Asset, ManifestLoader};
use bundle_diff::report::{ReportData, ReportRenderer};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::path::Path;

const EXTENSIONS: [&str; 6] = ["js", "css", "png", "html", "svg", "map"];

fn synthetic_assets(count: usize, growth: u64) -> Vec<Asset> {
    (0..count)
        .map(|i| {
            let ext = EXTENSIONS[i % EXTENSIONS.len()];
            // every 7th asset changes size between builds
            let size = 1_000 + (i as u64 * 37) % 50_000 + if i % 7 == 0 { growth } else { 0 };
            Asset::new(format!("chunk-{}.{}", i, ext), size)
        })
        .collect()
}

fn synthetic_manifest(count: usize) -> String {
    let assets: Vec<serde_json::Value> = synthetic_assets(count, 0)
        .into_iter()
        .map(|a| serde_json::json!({ "name": a.name, "size": a.size, "chunks": [0], "emitted": true }))
        .collect();
    serde_json::json!({ "time": 12_345, "assets": assets }).to_string()
}

fn bench_compute_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute diff");
    for count in [100, 1_000, 10_000] {
        let base = synthetic_assets(count, 0);
        // drop the last asset and add a new one so every category is exercised
        let mut head = synthetic_assets(count - 1, 512);
        head.push(Asset::new("fresh.js", 4_096));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            let engine = StatsDiff::new(DiffOptions::new().with_threshold(16));
            b.iter(|| black_box(engine.compute(black_box(&base), black_box(&head))));
        });
    }
    group.finish();
}

fn bench_diff_groups(c: &mut Criterion) {
    let base = synthetic_assets(5_000, 0);
    let head = synthetic_assets(5_000, 2_048);
    let groups = GroupExtensionLists::default().groups();

    c.bench_function("diff groups", |b| {
        b.iter(|| black_box(diff_groups(&groups, &base, &head, 0)));
    });
}

fn bench_parse_manifest(c: &mut Criterion) {
    let contents = synthetic_manifest(5_000);

    c.bench_function("parse manifest", |b| {
        b.iter(|| {
            black_box(ManifestLoader::parse(
                black_box(&contents),
                Path::new("stats.json"),
            ))
        });
    });
}

fn bench_render_report(c: &mut Criterion) {
    let base = synthetic_assets(2_000, 0);
    let head = synthetic_assets(2_000, 1_024);
    let data = ReportData {
        groups: diff_groups(&GroupExtensionLists::default().groups(), &base, &head, 0),
        build_time: None,
    };
    let renderer = ReportRenderer::default().detailed(true).include_unchanged(true);

    c.bench_function("render report", |b| {
        b.iter(|| black_box(renderer.render(black_box(&data))));
    });
}

criterion_group!(
    benches,
    bench_compute_diff,
    bench_diff_groups,
    bench_parse_manifest,
    bench_render_report
);
criterion_main!(benches);
