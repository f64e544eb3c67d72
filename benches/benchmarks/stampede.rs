use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use criterion::{Criterion, criterion_group};

use cachex::cache::cachex::Cachex;
use cachex::cache::config::ConfigBuilder;
use cachex::cache::errors::CacheError;
use cachex::cache::lru::LruStorage;

const CALLERS: usize = 32;

/// Measures one stampede: `CALLERS` threads miss the same key, one of them queries and the rest wait.
#[cfg(not(tarpaulin_include))]
pub fn stampede_32_threads(criterion: &mut Criterion) {
    criterion.bench_function("Cachex.get() | stampede of 32 threads on one key", |bencher| {
        bencher.iter_custom(|iterations| {
            let mut total_time = Duration::from_nanos(0);
            for iteration in 0..iterations {
                let cachex = Arc::new(Cachex::new(
                    ConfigBuilder::new(LruStorage::with_capacity(16, Duration::ZERO))
                        .querier(|key: &u64| -> Result<u64, CacheError> {
                            thread::sleep(Duration::from_micros(200));
                            Ok(*key)
                        })
                        .build()
                ));

                let start = Instant::now();
                let threads = (0..CALLERS).map(|_| {
                    let cachex = cachex.clone();
                    thread::spawn(move || {
                        let mut value = 0;
                        let _ = cachex.get(&iteration, &mut value);
                    })
                }).collect::<Vec<_>>();
                for thread in threads {
                    thread.join().unwrap();
                }
                total_time += start.elapsed();
            }
            total_time
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = stampede_32_threads
}
