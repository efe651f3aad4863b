//! Key-value backend benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use recordbook_storage::{FileKeyValueStore, FileOptions, InMemoryKeyValueStore, KeyValueStore};
use tempfile::TempDir;

/// Create a blob of given size.
fn blob(size: usize) -> String {
    "x".repeat(size)
}

/// Benchmark InMemoryKeyValueStore set/get.
fn bench_inmemory(c: &mut Criterion) {
    let mut group = c.benchmark_group("inmemory");

    for size in [256, 4096, 65536].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::new("set", size), size, |b, &size| {
            let store = InMemoryKeyValueStore::new();
            let value = blob(size);
            b.iter(|| store.set(black_box("parks"), black_box(&value)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("get", size), size, |b, &size| {
            let store = InMemoryKeyValueStore::new();
            store.set("parks", &blob(size)).unwrap();
            b.iter(|| black_box(store.get(black_box("parks")).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark FileKeyValueStore set with and without fsync.
fn bench_file_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_set");

    // Use larger sample size for file operations
    group.sample_size(50);

    for sync in [false, true] {
        group.bench_with_input(BenchmarkId::new("sync", sync), &sync, |b, &sync| {
            let temp_dir = TempDir::new().unwrap();
            let options = FileOptions::default().sync_on_write(sync);
            let store = FileKeyValueStore::open_with_options(temp_dir.path(), options).unwrap();
            let value = blob(4096);
            b.iter(|| store.set(black_box("parks"), black_box(&value)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_inmemory, bench_file_set);
criterion_main!(benches);
