//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use perseq::{AggregateOp, PersistentSequence, VersionId};

fn seed(len: usize) -> Vec<i64> {
    (0..len as i64).map(|i| (i * 7919) % 1000 - 500).collect()
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for len in [1_000usize, 100_000] {
        let values = seed(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &values, |b, values| {
            b.iter(|| PersistentSequence::from_values(black_box(values)).unwrap());
        });
    }
    group.finish();
}

fn benchmark_update(c: &mut Criterion) {
    let len = 100_000;
    let mut seq = PersistentSequence::from_values(&seed(len)).unwrap();
    let mut latest = VersionId(0);
    let mut step = 0usize;

    c.bench_function("update_len=100000", |b| {
        b.iter(|| {
            step = (step + 7_919) % len;
            latest = seq.update(latest, black_box(step), step as i64).unwrap();
        });
    });
}

fn benchmark_query(c: &mut Criterion) {
    let len = 100_000;
    let mut seq = PersistentSequence::from_values(&seed(len)).unwrap();
    let mut latest = VersionId(0);
    for i in 0..1_000 {
        latest = seq.update(latest, (i * 97) % len, i as i64).unwrap();
    }

    c.bench_function("query_old_version_len=100000", |b| {
        b.iter(|| {
            seq.query(
                black_box(VersionId(0)),
                black_box(1_234),
                black_box(98_765),
                AggregateOp::Sum,
            )
            .unwrap()
        });
    });
    c.bench_function("query_aggregate_latest_len=100000", |b| {
        b.iter(|| seq.query_aggregate(black_box(latest), 17, 77_777).unwrap());
    });
}

criterion_group!(benches, benchmark_build, benchmark_update, benchmark_query);
criterion_main!(benches);
