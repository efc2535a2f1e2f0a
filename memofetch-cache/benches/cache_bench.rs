//! Criterion benchmarks for the expiring cache: hit, miss, insert, evicting insert.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use memofetch_cache::ExpiringCache;

fn bench_get_hit(c: &mut Criterion) {
    let cache = ExpiringCache::new("bench", 1024, Duration::from_secs(3600)).unwrap();
    for i in 0..1024u32 {
        cache.put(format!("key-{i}"), "value".to_string());
    }
    let mut g = c.benchmark_group("get");
    g.throughput(Throughput::Elements(1));
    g.bench_function("hit", |b| {
        b.iter(|| black_box(cache.get("key-512")));
    });
    g.bench_function("miss", |b| {
        b.iter(|| black_box(cache.get("absent")));
    });
    g.finish();
}

fn bench_put(c: &mut Criterion) {
    let mut g = c.benchmark_group("put");
    g.throughput(Throughput::Elements(1));

    let roomy = ExpiringCache::new("bench", 1 << 20, Duration::from_secs(3600)).unwrap();
    let mut i = 0u64;
    g.bench_function("insert", |b| {
        b.iter(|| {
            i += 1;
            roomy.put(format!("key-{i}"), "value".to_string());
        });
    });

    // Full cache: every insert of a new key pays for an eviction scan.
    let full = ExpiringCache::new("bench", 1024, Duration::from_secs(3600)).unwrap();
    for i in 0..1024u32 {
        full.put(format!("key-{i}"), "value".to_string());
    }
    let mut j = 0u64;
    g.bench_function("insert_evicting", |b| {
        b.iter(|| {
            j += 1;
            full.put(format!("new-{j}"), "value".to_string());
        });
    });
    g.finish();
}

criterion_group!(benches, bench_get_hit, bench_put);
criterion_main!(benches);
