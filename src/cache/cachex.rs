use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use log::{debug, warn};

use crate::cache::config::{Config, QuerierType, StorageType};
use crate::cache::errors::CacheError;
use crate::cache::sentinel::Sentinel;
use crate::cache::stats::{ConcurrentStatsCounter, StatsSummary};
use crate::cache::storage::{Capabilities, Lookup};

type SentinelType<Value> = Arc<Sentinel<Value, CacheError>>;

/// Cachex implements cache-aside on top of a [`crate::cache::storage::Storage`] and an optional
/// [`crate::cache::querier::Querier`].
///
/// A `get` which does not find a fresh value in the storage refreshes it from the querier.
/// Concurrent refreshes of the same key are collapsed: the callers race to install a [`Sentinel`]
/// for the key, the one which wins queries and writes the value back, and all the others wait on
/// the winner's Sentinel and receive the same `(value, error)` pair. The querier runs once per key
/// no matter how many callers missed it at the same time.
///
/// If `use_stale_when_error` is on and the storage still holds an expired value for the key, a failed
/// refresh delivers the expired value together with the query error. Callers must check the error even
/// if the value was written.
pub struct Cachex<Key, Value>
    where Key: Hash + Eq + Send + Sync + Clone + 'static,
          Value: Send + Sync + Clone + 'static {
    storage: StorageType<Key, Value>,
    querier: Option<QuerierType<Key, Value>>,
    capabilities: Capabilities,
    use_stale: AtomicBool,
    sentinels: DashMap<Key, SentinelType<Value>>,
    stats_counter: ConcurrentStatsCounter,
}

/// Flight is held by the caller which owns the refresh of a key.
/// Dropping it completes the Sentinel (with `RefreshAborted` if nothing completed it before, which only
/// happens while unwinding) and only then removes the Sentinel from the registry.
struct Flight<'a, Key, Value>
    where Key: Hash + Eq {
    sentinels: &'a DashMap<Key, SentinelType<Value>>,
    key: &'a Key,
    sentinel: SentinelType<Value>,
}

impl<'a, Key, Value> Flight<'a, Key, Value>
    where Key: Hash + Eq {
    fn complete(self, value: Option<Value>, error: Option<CacheError>) {
        self.sentinel.done(value, error);
    }
}

impl<'a, Key, Value> Drop for Flight<'a, Key, Value>
    where Key: Hash + Eq {
    fn drop(&mut self) {
        if self.sentinel.done(None, Some(CacheError::RefreshAborted)) {
            warn!("refresh aborted, waiters are released with an error");
        }
        self.sentinels.remove_if(self.key, |_, sentinel| Arc::ptr_eq(sentinel, &self.sentinel));
    }
}

impl<Key, Value> Cachex<Key, Value>
    where Key: Hash + Eq + Send + Sync + Clone + 'static,
          Value: Send + Sync + Clone + 'static {
    pub fn new(config: Config<Key, Value>) -> Self {
        let capabilities = config.storage.capabilities();
        debug!("creating cachex with storage capabilities {:?}", capabilities);

        Cachex {
            storage: config.storage,
            querier: config.querier,
            capabilities,
            use_stale: AtomicBool::new(config.use_stale_when_error),
            sentinels: DashMap::new(),
            stats_counter: ConcurrentStatsCounter::new(),
        }
    }

    /// Writes the value for the key into `value`.
    ///
    /// Returns [`CacheError::NotFound`] (leaving `value` untouched) if neither the storage nor the querier
    /// has the key. With stale values enabled, a failed refresh of an expired key writes the expired value
    /// and still returns the query error.
    pub fn get(&self, key: &Key, value: &mut Value) -> Result<(), CacheError> {
        match self.storage.get(key)? {
            Lookup::Hit(found) => {
                self.stats_counter.found_a_hit();
                *value = found;
                return Ok(());
            }
            Lookup::Expired(_) => self.stats_counter.found_an_expired_value(),
            Lookup::Missing => {}
        }
        self.stats_counter.found_a_miss();

        let querier = match &self.querier {
            Some(querier) => querier,
            None => return Err(CacheError::NotFound),
        };

        let (sentinel, owned) = self.arbitrate(key);
        if !owned {
            self.stats_counter.wait_for_refresh();
            let (delivered, error) = sentinel.wait();
            if let Some(delivered) = delivered {
                *value = delivered;
            }
            return match error {
                Some(error) => Err(error),
                None => Ok(()),
            };
        }

        let flight = Flight { sentinels: &self.sentinels, key, sentinel };
        self.refresh(key, querier, flight, value)
    }

    /// Writers are never deduplicated, the value goes straight to the storage.
    pub fn set(&self, key: Key, value: Value) -> Result<(), CacheError> {
        self.storage.set(key, value)
    }

    pub fn set_with_ttl(&self, key: Key, value: Value, time_to_live: Duration) -> Result<(), CacheError> {
        if !self.capabilities.ttl_overridable {
            return Err(CacheError::Unsupported("set_with_ttl"));
        }
        self.storage.set_with_ttl(key, value, time_to_live)
    }

    pub fn delete(&self, key: &Key) -> Result<(), CacheError> {
        if !self.capabilities.deletable {
            return Err(CacheError::Unsupported("delete"));
        }
        self.storage.delete(key)
    }

    pub fn use_stale_when_error(&self, use_stale: bool) {
        self.use_stale.store(use_stale, Ordering::Release);
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Returns the number of refreshes currently in progress.
    pub fn refreshes_in_flight(&self) -> usize {
        self.sentinels.len()
    }

    pub fn stats_summary(&self) -> StatsSummary {
        self.stats_counter.summary()
    }

    pub fn reset_stats(&self) {
        self.stats_counter.clear();
    }

    /// Installs a new Sentinel for the key unless one is already live.
    /// Returns the canonical Sentinel and whether the caller owns it.
    fn arbitrate(&self, key: &Key) -> (SentinelType<Value>, bool) {
        let candidate = Sentinel::new();
        let canonical = self.sentinels
            .entry(key.clone())
            .or_insert_with(|| candidate.clone())
            .value()
            .clone();

        let owned = Arc::ptr_eq(&canonical, &candidate);
        if !owned {
            debug!("refresh already in flight, waiting for it");
            candidate.discard();
        }
        (canonical, owned)
    }

    /// Runs under the Flight of the key. The storage is probed again first, it may have been written
    /// (or the key deleted) since the caller's probe, and only this probe decides the stale value.
    fn refresh(&self,
               key: &Key,
               querier: &QuerierType<Key, Value>,
               flight: Flight<'_, Key, Value>,
               value: &mut Value) -> Result<(), CacheError> {
        let stale = match self.storage.get(key) {
            Ok(Lookup::Hit(found)) => {
                *value = found.clone();
                flight.complete(Some(found), None);
                return Ok(());
            }
            Ok(Lookup::Expired(expired)) => Some(expired),
            Ok(Lookup::Missing) => None,
            Err(error) => {
                flight.complete(None, Some(error.clone()));
                return Err(error);
            }
        };

        self.stats_counter.issue_query();
        let error = match querier.query(key) {
            Ok(fetched) => return self.persist(key, fetched, flight, value),
            Err(error) => error,
        };

        if let Some(stale) = stale.filter(|_| self.use_stale.load(Ordering::Acquire)) {
            warn!("refresh failed, delivering the expired value: {}", error);
            self.stats_counter.serve_stale();
            *value = stale.clone();
            flight.complete(Some(stale), Some(error.clone()));
            return Err(error);
        }

        let error = match error {
            CacheError::NotFound => CacheError::NotFound,
            error => {
                warn!("refresh failed: {}", error);
                error
            }
        };
        flight.complete(None, Some(error.clone()));
        Err(error)
    }

    /// Waiters always receive the fetched value; a failure to write it only reaches the caller which refreshed.
    fn persist(&self, key: &Key, fetched: Value, flight: Flight<'_, Key, Value>, value: &mut Value) -> Result<(), CacheError> {
        let persisted = self.storage.set(key.clone(), fetched.clone());
        *value = fetched.clone();
        flight.complete(Some(fetched), None);

        if let Err(error) = &persisted {
            warn!("refreshed value could not be persisted: {}", error);
            self.stats_counter.fail_to_persist();
        }
        persisted
    }
}
