use std::{path::Path, time::Duration};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hmmpos::{Corpus, HmmModel};

fn load(fpath: &Path, copies: usize) -> Corpus {
    let corpus = Corpus::from_path(fpath).expect("failed to read corpus");
    (0..copies).flat_map(|_| corpus.sentences.clone()).collect()
}

fn train_benchmark(c: &mut Criterion) {
    let corpus = load(Path::new("tests/data/train.txt"), 1000);
    c.bench_function("train", |b| {
        b.iter(|| HmmModel::build(black_box(&corpus)).expect("failed to train"))
    });
}

criterion_group! {
    name = benchmarks;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = train_benchmark
}

criterion_main!(benchmarks);
