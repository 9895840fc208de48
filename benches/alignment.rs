use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use overlap::{AlignOptions, Aligner, BatchPair};

const SOURCE: &str = "The council approved the harbour expansion on Thursday after a \
two-year review, citing projected growth in container traffic and the need to \
replace the ageing north pier. Opponents argued the plan ignored flood risk. ";

fn summary_of(source: &str) -> String {
    // Keep every third sentence fragment so matches are long but broken up.
    source
        .split(", ")
        .enumerate()
        .filter(|(i, _)| i % 3 != 1)
        .map(|(_, part)| part)
        .collect::<Vec<_>>()
        .join(" and ")
}

fn bench_single_pair(c: &mut Criterion) {
    let aligner = Aligner::default();
    let mut group = c.benchmark_group("align_pair");

    for repeats in [1usize, 8, 32] {
        let a = SOURCE.repeat(repeats);
        let b = summary_of(&a);
        group.throughput(Throughput::Bytes((a.len() + b.len()) as u64));
        group.bench_function(format!("source_x{repeats}"), |bench| {
            bench.iter(|| aligner.align(black_box(&a), black_box(&b)).expect("align"))
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let aligner =
        Aligner::new(AlignOptions::default().with_stopwords(["the", "a", "and", "of"]))
            .expect("options");
    let document = SOURCE.repeat(4);
    let candidates: Vec<String> = (0..64)
        .map(|i| format!("{} variant {i}", summary_of(&document)))
        .collect();
    let pairs: Vec<BatchPair> = candidates
        .iter()
        .map(|c| BatchPair::new(document.as_str(), c.as_str()))
        .collect();

    let mut group = c.benchmark_group("align_batch");
    group.throughput(Throughput::Elements(pairs.len() as u64));
    group.bench_function("align_all_64", |bench| {
        bench.iter(|| aligner.align_all(black_box(&pairs)))
    });
    group.bench_function("one_to_many_64", |bench| {
        bench.iter(|| {
            aligner
                .align_one_to_many(black_box(&document), black_box(&candidates))
                .expect("document")
        })
    });
    group.finish();
}

criterion_group!(benches, bench_single_pair, bench_batch);
criterion_main!(benches);
