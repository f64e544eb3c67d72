use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_utils::CachePadded;

const TOTAL_STATS: usize = 7;

/// Defines various stats that are measured by [`crate::cache::cachex::Cachex`].
#[repr(usize)]
#[non_exhaustive]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StatsType {
    /// Defines the number of gets answered by the storage with a fresh value
    CacheHits = 0,
    /// Defines the number of gets which did not find a fresh value in the storage
    CacheMisses = 1,
    /// Defines the number of gets which found an expired value in the storage
    ExpiredHits = 2,
    /// Defines the number of queries issued to the querier
    QueriesIssued = 3,
    /// Defines the number of gets which waited for a refresh performed by another caller
    RefreshWaits = 4,
    /// Defines the number of times a stale value was delivered because the refresh failed
    StaleServed = 5,
    /// Defines the number of refreshed values which could not be written to the storage
    PersistFailures = 6,
}

impl StatsType {
    const VALUES: [Self; TOTAL_STATS] = [
        Self::CacheHits,
        Self::CacheMisses,
        Self::ExpiredHits,
        Self::QueriesIssued,
        Self::RefreshWaits,
        Self::StaleServed,
        Self::PersistFailures,
    ];
}

/// StatsSummary is view representation of various stats represented by [`StatsType`].
#[derive(Debug, PartialEq)]
pub struct StatsSummary {
    pub stats_by_type: HashMap<StatsType, u64>,
    pub hit_ratio: f64,
}

impl StatsSummary {
    pub(crate) fn new(stats_by_type: HashMap<StatsType, u64>, hit_ratio: f64) -> Self {
        StatsSummary {
            stats_by_type,
            hit_ratio,
        }
    }

    /// Returns an Option&lt;u64&gt; counter corresponding to the [`StatsType`].
    pub fn get(&self, stats_type: &StatsType) -> Option<u64> {
        self.stats_by_type.get(stats_type).copied()
    }
}

#[repr(transparent)]
#[derive(Debug)]
struct Counter(CachePadded<AtomicU64>);

/// ConcurrentStatsCounter measures various stats defined by [`StatsType`].
/// Each counter is a [`crossbeam_utils::CachePadded`] AtomicU64, to avoid false sharing between
/// callers which update different stats.
pub(crate) struct ConcurrentStatsCounter {
    entries: [Counter; TOTAL_STATS],
}

impl ConcurrentStatsCounter {
    pub(crate) fn new() -> Self {
        ConcurrentStatsCounter {
            entries: std::array::from_fn(|_index| Counter(CachePadded::new(AtomicU64::new(0)))),
        }
    }

    pub(crate) fn found_a_hit(&self) { self.add(StatsType::CacheHits, 1); }

    pub(crate) fn found_a_miss(&self) { self.add(StatsType::CacheMisses, 1); }

    pub(crate) fn found_an_expired_value(&self) { self.add(StatsType::ExpiredHits, 1); }

    pub(crate) fn issue_query(&self) { self.add(StatsType::QueriesIssued, 1); }

    pub(crate) fn wait_for_refresh(&self) { self.add(StatsType::RefreshWaits, 1); }

    pub(crate) fn serve_stale(&self) { self.add(StatsType::StaleServed, 1); }

    pub(crate) fn fail_to_persist(&self) { self.add(StatsType::PersistFailures, 1); }

    pub(crate) fn hits(&self) -> u64 {
        self.get(&StatsType::CacheHits)
    }

    pub(crate) fn misses(&self) -> u64 {
        self.get(&StatsType::CacheMisses)
    }

    pub(crate) fn hit_ratio(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            return 0.0;
        }
        (hits as f64) / (total as f64)
    }

    pub(crate) fn clear(&self) {
        for entry in &self.entries {
            entry.0.store(0, Ordering::Release);
        }
    }

    pub(crate) fn summary(&self) -> StatsSummary {
        let mut stats_by_type = HashMap::new();
        for stats_type in StatsType::VALUES.iter().copied() {
            stats_by_type.insert(stats_type, self.get(&stats_type));
        }
        StatsSummary::new(stats_by_type, self.hit_ratio())
    }

    fn add(&self, stats_type: StatsType, count: u64) {
        self.entries[stats_type as usize].0.fetch_add(count, Ordering::AcqRel);
    }

    fn get(&self, stats_type: &StatsType) -> u64 {
        self.entries[*stats_type as usize].0.load(Ordering::Acquire)
    }
}
