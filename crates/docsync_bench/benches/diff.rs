//! Classify, reduce, and apply benchmarks.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion,
};
use docsync_core::{
    diff_batch, ChangeBatch, Document, DocumentChange, DocumentId, FieldMap, NullSink,
    SnapshotDiff,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Row {
    id: DocumentId,
    value: i64,
}

impl Document for Row {
    fn id(&self) -> &DocumentId {
        &self.id
    }
}

fn row(n: usize) -> Row {
    Row {
        id: DocumentId::new(format!("row-{n:06}")),
        value: n as i64,
    }
}

fn body(n: usize) -> FieldMap {
    json!({"value": n as i64}).as_object().unwrap().clone()
}

/// A batch with an even mix of added, modified, and removed events.
fn mixed_batch(size: usize) -> ChangeBatch {
    (0..size)
        .map(|n| {
            let id = DocumentId::new(format!("row-{n:06}"));
            match n % 3 {
                0 => DocumentChange::added(id, body(n)),
                1 => DocumentChange::modified(id, body(n)),
                _ => DocumentChange::removed(id, body(n)),
            }
        })
        .collect()
}

fn bench_diff_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_batch");

    for size in [16, 128, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let batch = mixed_batch(size);
            let sink = NullSink;
            b.iter_batched(
                || batch.clone(),
                |batch| {
                    let diff: SnapshotDiff<Row> = diff_batch(batch, &sink);
                    black_box(diff);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");

    // Apply a 200-record diff to collections of varying size.
    for size in [100, 1000, 10000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let collection: Vec<Row> = (0..size).map(row).collect();
            let diff = SnapshotDiff::reduce(
                (size..size + 100).map(row).collect(),
                (0..50).map(row).collect(),
                (50..100).map(row).collect(),
            );
            b.iter_batched(
                || (diff.clone(), collection.clone()),
                |(diff, mut collection)| {
                    diff.apply(&mut collection);
                    black_box(collection.len());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_full_path(c: &mut Criterion) {
    c.bench_function("notification_to_collection", |b| {
        let collection: Vec<Row> = (0..1000).map(row).collect();
        let batch = mixed_batch(256);
        let sink = NullSink;
        b.iter_batched(
            || (batch.clone(), collection.clone()),
            |(batch, mut collection)| {
                let diff: SnapshotDiff<Row> = diff_batch(batch, &sink);
                diff.apply(&mut collection);
                black_box(collection.len());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_diff_batch, bench_apply, bench_full_path);

criterion_main!(benches);
