use std::collections::BTreeMap;
use std::hash::Hash;
use std::time::Duration;

use hashbrown::HashMap;
use log::debug;
use parking_lot::Mutex;

use crate::cache::clock::ClockType;
use crate::cache::errors::CacheError;
use crate::cache::lru::config::{LruConfig, LruConfigBuilder};
use crate::cache::lru::stored_value::StoredValue;
use crate::cache::storage::{Capabilities, Lookup, Storage};
use crate::cache::types::{AccessStamp, TotalCapacity};

pub mod config;
pub(crate) mod stored_value;

/// LruStorage is the in-memory reference implementation of [`crate::cache::storage::Storage`].
///
/// It holds at most `max_entries` entries (0 = unbounded) and evicts the least recently used entry
/// to make room for a new key. Every entry carries an absolute expiry, computed from the default time to live
/// on `set` or from the time to live given to `set_with_ttl`.
///
/// An expired entry is not removed when it is read: `get` returns it as [`Lookup::Expired`] and it stays
/// until it is evicted, overwritten or deleted. This is what allows [`crate::cache::cachex::Cachex`]
/// to fall back to stale data when a refresh fails.
///
/// The key table and the recency order live behind a single [`parking_lot::Mutex`].
/// Recency is tracked with a monotonically increasing `AccessStamp`, both reads (of fresh entries) and writes
/// take a new stamp, and the entry with the smallest stamp is the one evicted.
pub struct LruStorage<Key, Value>
    where Key: Hash + Eq, {
    entries: Mutex<Entries<Key, Value>>,
    max_entries: TotalCapacity,
    default_time_to_live: Duration,
    clock: ClockType,
}

struct Entries<Key, Value> {
    by_key: HashMap<Key, StoredValue<Value>>,
    by_recency: BTreeMap<AccessStamp, Key>,
    next_stamp: AccessStamp,
}

impl<Key, Value> Entries<Key, Value>
    where Key: Hash + Eq + Clone, {
    fn next_stamp(&mut self) -> AccessStamp {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        stamp
    }

    fn evict_least_recently_used(&mut self) {
        if let Some((_, key)) = self.by_recency.pop_first() {
            self.by_key.remove(&key);
            debug!("evicted the least recently used entry, total entries {}", self.by_key.len());
        }
    }
}

impl<Key, Value> LruStorage<Key, Value>
    where Key: Hash + Eq + Clone, {
    pub fn new(config: LruConfig) -> Self {
        LruStorage {
            entries: Mutex::new(Entries {
                by_key: HashMap::new(),
                by_recency: BTreeMap::new(),
                next_stamp: 0,
            }),
            max_entries: config.max_entries,
            default_time_to_live: config.default_time_to_live,
            clock: config.clock,
        }
    }

    /// Shorthand for an LruStorage with the system clock.
    pub fn with_capacity(max_entries: TotalCapacity, default_time_to_live: Duration) -> Self {
        Self::new(LruConfigBuilder::new()
            .max_entries(max_entries)
            .default_time_to_live(default_time_to_live)
            .build())
    }

    pub fn put(&self, key: Key, value: Value) {
        self.put_with_ttl(key, value, self.default_time_to_live);
    }

    /// A `time_to_live` of zero means the entry never expires, irrespective of the default time to live.
    pub fn put_with_ttl(&self, key: Key, value: Value, time_to_live: Duration) {
        let mut entries = self.entries.lock();
        let stamp = entries.next_stamp();
        let stored_value = StoredValue::new(value, time_to_live, stamp, &self.clock);

        let existing_stamp = entries.by_key.get(&key).map(|stored_value| stored_value.access_stamp);
        match existing_stamp {
            Some(existing_stamp) => {
                entries.by_recency.remove(&existing_stamp);
            }
            None => {
                if self.max_entries > 0 && entries.by_key.len() >= self.max_entries {
                    entries.evict_least_recently_used();
                }
            }
        }

        entries.by_recency.insert(stamp, key.clone());
        entries.by_key.insert(key, stored_value);
    }

    pub fn delete(&self, key: &Key) {
        let mut entries = self.entries.lock();
        if let Some(stored_value) = entries.by_key.remove(key) {
            entries.by_recency.remove(&stored_value.access_stamp);
        }
    }

    /// Returns true if the key is present, expired or not. Does not count as an access.
    pub fn contains(&self, key: &Key) -> bool {
        self.entries.lock().by_key.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        entries.by_key.clear();
        entries.by_recency.clear();
        entries.next_stamp = 0;
    }
}

impl<Key, Value> LruStorage<Key, Value>
    where Key: Hash + Eq + Clone,
          Value: Clone, {
    pub fn lookup(&self, key: &Key) -> Lookup<Value> {
        let mut guard = self.entries.lock();
        let entries = &mut *guard;

        let stored_value = match entries.by_key.get_mut(key) {
            Some(stored_value) => stored_value,
            None => return Lookup::Missing,
        };
        if !stored_value.is_alive(&self.clock) {
            return Lookup::Expired(stored_value.value());
        }

        let stamp = entries.next_stamp;
        entries.next_stamp += 1;
        if let Some(key) = entries.by_recency.remove(&stored_value.access_stamp) {
            entries.by_recency.insert(stamp, key);
        }
        stored_value.access_stamp = stamp;

        Lookup::Hit(stored_value.value())
    }
}

impl<Key, Value> Storage<Key, Value> for LruStorage<Key, Value>
    where Key: Hash + Eq + Clone + Send + Sync,
          Value: Clone + Send + Sync, {
    fn get(&self, key: &Key) -> Result<Lookup<Value>, CacheError> {
        Ok(self.lookup(key))
    }

    fn set(&self, key: Key, value: Value) -> Result<(), CacheError> {
        self.put(key, value);
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    fn delete(&self, key: &Key) -> Result<(), CacheError> {
        LruStorage::delete(self, key);
        Ok(())
    }

    fn set_with_ttl(&self, key: Key, value: Value, time_to_live: Duration) -> Result<(), CacheError> {
        self.put_with_ttl(key, value, time_to_live);
        Ok(())
    }
}
