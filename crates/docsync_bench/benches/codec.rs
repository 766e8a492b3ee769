//! Document codec benchmarks.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion,
};
use docsync_codec::{
    decode_document, decode_documents, encode_document, Document, DocumentId, FieldMap, NullSink,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Profile {
    id: DocumentId,
    name: String,
    email: String,
    age: i64,
    tags: Vec<String>,
}

impl Document for Profile {
    fn id(&self) -> &DocumentId {
        &self.id
    }
}

/// Create a profile with deterministic contents.
fn profile(n: usize) -> Profile {
    Profile {
        id: DocumentId::new(format!("profile-{n:06}")),
        name: format!("User {n}"),
        email: format!("user{n}@example.com"),
        age: (n % 80) as i64,
        tags: vec!["alpha".into(), "beta".into(), "gamma".into()],
    }
}

/// Create an encoded `(identity, payload)` pair.
fn encoded(n: usize) -> (DocumentId, FieldMap) {
    let record = profile(n);
    let fields = encode_document(&record).unwrap();
    (record.id().clone(), fields)
}

fn bench_encode(c: &mut Criterion) {
    c.bench_function("encode_document", |b| {
        let record = profile(1);
        b.iter(|| {
            let fields = encode_document(black_box(&record)).unwrap();
            black_box(fields);
        });
    });
}

fn bench_decode(c: &mut Criterion) {
    c.bench_function("decode_document", |b| {
        let (id, fields) = encoded(1);
        b.iter_batched(
            || fields.clone(),
            |fields| {
                let record: Profile = decode_document(fields, &id).unwrap();
                black_box(record);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_decode_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_documents");

    for size in [16, 128, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let pairs: Vec<(DocumentId, FieldMap)> = (0..size).map(encoded).collect();
            let sink = NullSink;
            b.iter_batched(
                || pairs.clone(),
                |pairs| {
                    let records: Vec<Profile> = decode_documents(pairs, &sink);
                    black_box(records);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    c.bench_function("roundtrip", |b| {
        let record = profile(1);
        b.iter(|| {
            let fields = encode_document(black_box(&record)).unwrap();
            let decoded: Profile = decode_document(fields, record.id()).unwrap();
            black_box(decoded);
        });
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_decode_batch,
    bench_roundtrip,
);

criterion_main!(benches);
