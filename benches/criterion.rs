mod common;

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use steam_dmenu::{
    data::ExclusionSet,
    library::build_library_tree,
    manifest::ManifestResolver,
    menu::render_menu_lines,
    parsers::parse_vdf,
};

fn parse_benchmarks(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let document = common::write_mock_library(dir.path());

    let mut group = c.benchmark_group("parse");

    group.bench_function("libraryfolders.vdf", |b| {
        b.iter(|| parse_vdf(black_box(&document)))
    });

    let parsed = parse_vdf(&document).unwrap();
    group.bench_function("serialize", |b| b.iter(|| black_box(&parsed).to_string()));

    group.finish();
}

fn pipeline_benchmarks(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let document = common::write_mock_library(dir.path());
    let document = parse_vdf(&document).unwrap();

    let mut group = c.benchmark_group("pipeline");

    group.bench_function("build_library_tree (cold cache)", |b| {
        b.iter(|| build_library_tree(&document, &mut ManifestResolver::new()))
    });

    let mut resolver = ManifestResolver::new();
    build_library_tree(&document, &mut resolver).unwrap();
    group.bench_function("build_library_tree (warm cache)", |b| {
        b.iter(|| build_library_tree(&document, &mut resolver))
    });

    let tree = build_library_tree(&document, &mut ManifestResolver::new()).unwrap();
    let exclusions = ExclusionSet::default();
    group.bench_function("render_menu_lines", |b| {
        b.iter(|| render_menu_lines(&tree, &exclusions, "play "))
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = parse_benchmarks, pipeline_benchmarks
}
criterion_main!(benches);
