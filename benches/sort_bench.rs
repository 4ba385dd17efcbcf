//! Ranking benchmarks.
//!
//! Re-sorting happens on every `s` keypress, always from the source-order
//! records, so each iteration clones and sorts the full set.
//!
//! ```sh
//! cargo bench --bench sort_bench
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::BTreeMap;
use std::hint::black_box;
use thumbrank_core::{sort_records, SortOption, ThumbnailRecord};

fn records(n: usize) -> Vec<ThumbnailRecord> {
    (0..n)
        .map(|i| ThumbnailRecord {
            id: format!("row-{}", i + 1),
            title: format!("Video {i}"),
            thumbnail_url: format!("https://img.example/{i}.jpg"),
            ctr: (i * 37 % 200) as f64 / 10.0,
            views: (i * 113 % 50_000) as f64,
            rating: ["S+", "S", "A", "B", "C", "-"][i % 6].to_string(),
            raw_fields: BTreeMap::new(),
        })
        .collect()
}

fn sort_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for n in [100usize, 10_000] {
        let data = records(n);
        group.throughput(Throughput::Elements(n as u64));
        for option in [SortOption::CtrDesc, SortOption::CtrAsc, SortOption::RatingDesc] {
            group.bench_with_input(BenchmarkId::new(option.to_string(), n), &data, |b, data| {
                b.iter(|| black_box(sort_records(black_box(data), option)))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, sort_bench);
criterion_main!(benches);
