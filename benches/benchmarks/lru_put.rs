use std::sync::Arc;
use std::time::{Duration, Instant};

use criterion::{Criterion, criterion_group};

use cachex::cache::lru::LruStorage;

use crate::benchmarks::common::{execute_parallel, zipf_keys};

/// Defines the maximum number of entries in the storage
const CAPACITY: usize = 2 << 14;

/// Defines the total sample size that is used for generating Zipf distribution.
/// Keeping it larger than the capacity forces evictions.
const ITEMS: usize = CAPACITY * 2;

const SAMPLES: usize = 2 << 16;
const MASK: usize = SAMPLES - 1;

#[cfg(not(tarpaulin_include))]
pub fn put_single_threaded(criterion: &mut Criterion) {
    let storage = LruStorage::with_capacity(CAPACITY, Duration::ZERO);
    let keys = zipf_keys(ITEMS as u64, SAMPLES);

    let mut index = 0;
    criterion.bench_function("LruStorage.put() | No contention", |bencher| {
        bencher.iter_custom(|iterations| {
            let start = Instant::now();
            for _ in 0..iterations {
                storage.put(keys[index & MASK], keys[index & MASK]);
                index += 1;
            }
            start.elapsed()
        });
    });
}

#[cfg(not(tarpaulin_include))]
pub fn put_8_threads(criterion: &mut Criterion) {
    let storage = LruStorage::with_capacity(CAPACITY, Duration::ZERO);

    execute_parallel(criterion, "LruStorage.put() | 8 threads", zipf_keys(ITEMS as u64, SAMPLES), Arc::new(move |key: &u64| {
        storage.put(*key, *key);
    }), 8);
}

criterion_group!(benches, put_single_threaded, put_8_threads);
