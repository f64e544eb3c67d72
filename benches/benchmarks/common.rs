use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use criterion::Criterion;
use rand::{Rng, thread_rng};
use rand_distr::Zipf;

/// Samples keys from a Zipf distribution over `1..=items`: a few keys are hot, the tail is cold.
/// `samples` must be a power of two, benchmarks index the keys with `samples - 1` as a mask.
pub fn zipf_keys(items: u64, samples: usize) -> Arc<Vec<u64>> {
    assert!(samples.is_power_of_two());
    let zipf = Zipf::new(items, 1.01).unwrap();
    Arc::new(thread_rng().sample_iter(zipf).take(samples).map(|key| key as u64).collect())
}

/// Runs `operation` against `keys` from `thread_count` threads and reports the mean time spent by a thread.
/// Criterion's iterations are split evenly between the threads and every thread starts at its own offset in `keys`,
/// so the threads do not walk the keys in lockstep.
pub fn execute_parallel<F>(
    criterion: &mut Criterion,
    id: &'static str,
    keys: Arc<Vec<u64>>,
    operation: Arc<F>,
    thread_count: usize)
    where F: Fn(&u64) + Send + Sync + 'static {

    let mask = keys.len() - 1;
    criterion.bench_function(id, |bencher| bencher.iter_custom(|iterations| {
        let per_thread_iterations = iterations / thread_count as u64;
        let workers = (0..thread_count).map(|worker| {
            let offset = worker * keys.len() / thread_count;
            let keys = keys.clone();
            let operation = operation.clone();
            thread::spawn(move || {
                let start = Instant::now();
                for iteration in 0..per_thread_iterations as usize {
                    operation(&keys[(offset + iteration) & mask]);
                }
                start.elapsed()
            })
        }).collect::<Vec<_>>();

        let total_time: Duration = workers.into_iter().map(|worker| worker.join().unwrap()).sum();
        total_time / thread_count as u32
    }));
}
