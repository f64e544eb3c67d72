use std::sync::Arc;
use std::time::{Duration, Instant};

use criterion::{Criterion, criterion_group};

use cachex::cache::cachex::Cachex;
use cachex::cache::config::ConfigBuilder;
use cachex::cache::errors::CacheError;
use cachex::cache::lru::LruStorage;

use crate::benchmarks::common::{execute_parallel, zipf_keys};

const CAPACITY: usize = 2 << 14;
const ITEMS: usize = CAPACITY / 3;
const MASK: usize = CAPACITY - 1;

#[cfg(not(tarpaulin_include))]
pub fn get_single_threaded(criterion: &mut Criterion) {
    let cachex = loaded_cachex();
    let keys = zipf_keys(ITEMS as u64, CAPACITY);

    let mut index = 0;
    let mut value = 0;
    criterion.bench_function("Cachex.get() | No contention", |bencher| {
        bencher.iter_custom(|iterations| {
            let start = Instant::now();
            for _ in 0..iterations {
                let _ = cachex.get(&keys[index & MASK], &mut value);
                index += 1;
            }
            start.elapsed()
        });
    });
}

#[cfg(not(tarpaulin_include))]
pub fn get_8_threads(criterion: &mut Criterion) {
    get_parallel(criterion, "Cachex.get() | 8 threads", 8);
}

#[cfg(not(tarpaulin_include))]
pub fn get_16_threads(criterion: &mut Criterion) {
    get_parallel(criterion, "Cachex.get() | 16 threads", 16);
}

#[cfg(not(tarpaulin_include))]
fn get_parallel(criterion: &mut Criterion, id: &'static str, thread_count: usize) {
    let cachex = loaded_cachex();

    execute_parallel(criterion, id, zipf_keys(ITEMS as u64, CAPACITY), Arc::new(move |key: &u64| {
        let mut value = 0;
        let _ = cachex.get(key, &mut value);
    }), thread_count);
}

/// Every key in the distribution is either loaded upfront or refreshed on its first miss.
fn loaded_cachex() -> Cachex<u64, u64> {
    let cachex = Cachex::new(
        ConfigBuilder::new(LruStorage::with_capacity(CAPACITY, Duration::ZERO))
            .querier(|key: &u64| -> Result<u64, CacheError> { Ok(*key) })
            .build()
    );
    for key in 0..ITEMS as u64 {
        let _ = cachex.set(key, key);
    }
    cachex
}

criterion_group!(benches, get_single_threaded, get_8_threads, get_16_threads);
