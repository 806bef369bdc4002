mod corpus_generator;

use corpus_generator::generate_manifest;
use criterion::{Criterion, criterion_group, criterion_main};
use steamcfg::KeyValuesParser;

fn parsing_benchmarks(c: &mut Criterion) {
    let small = generate_manifest(50);
    let medium = generate_manifest(300);
    let large = generate_manifest(1_000);

    let mut group = c.benchmark_group("keyvalues_parsing");

    group.bench_function("small_50_entries", |b| {
        b.iter(|| KeyValuesParser::parse_body(&small).unwrap())
    });

    group.bench_function("medium_300_entries", |b| {
        b.iter(|| KeyValuesParser::parse_body(&medium).unwrap())
    });

    group.bench_function("large_1000_entries", |b| {
        b.iter(|| KeyValuesParser::parse_body(&large).unwrap())
    });

    group.finish();
}

criterion_group!(benches, parsing_benchmarks);
criterion_main!(benches);
