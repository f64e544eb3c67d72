use std::time::Duration;

use crate::cache::clock::{ClockType, SystemClock};
use crate::cache::types::TotalCapacity;

const MAX_ENTRIES: TotalCapacity = 0;
const DEFAULT_TIME_TO_LIVE: Duration = Duration::ZERO;

/// Defines the config for [`crate::cache::lru::LruStorage`]
/// `max_entries` is the maximum number of entries the storage holds before it evicts the least recently used one, 0 means unbounded
/// `default_time_to_live` applies to every `set`, zero means the entries never expire. `set_with_ttl` overrides it for one entry
/// `clock` defines an implementation of [`crate::cache::clock::Clock`] to be used to get the current time
pub struct LruConfig {
    pub max_entries: TotalCapacity,
    pub default_time_to_live: Duration,
    pub clock: ClockType,
}

pub struct LruConfigBuilder {
    max_entries: TotalCapacity,
    default_time_to_live: Duration,
    clock: ClockType,
}

impl Default for LruConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LruConfigBuilder {
    pub fn new() -> Self {
        LruConfigBuilder {
            max_entries: MAX_ENTRIES,
            default_time_to_live: DEFAULT_TIME_TO_LIVE,
            clock: SystemClock::boxed(),
        }
    }

    pub fn max_entries(mut self, max_entries: TotalCapacity) -> LruConfigBuilder {
        self.max_entries = max_entries;
        self
    }

    pub fn default_time_to_live(mut self, time_to_live: Duration) -> LruConfigBuilder {
        self.default_time_to_live = time_to_live;
        self
    }

    pub fn clock(mut self, clock: ClockType) -> LruConfigBuilder {
        self.clock = clock;
        self
    }

    pub fn build(self) -> LruConfig {
        LruConfig {
            max_entries: self.max_entries,
            default_time_to_live: self.default_time_to_live,
            clock: self.clock,
        }
    }
}
