//! Cache-aside middleware sitting between callers and a slow data source.
//!
//! [`crate::cache::cachex::Cachex`] composes a [`crate::cache::storage::Storage`] with an optional
//! [`crate::cache::querier::Querier`]. Concurrent misses for the same key collapse into a single query
//! and, when enabled, an expired value is delivered alongside the error of a failed refresh.
//! [`crate::cache::lru::LruStorage`] is the in-memory reference storage.
pub mod cache;
