use std::time::Duration;

use crate::cache::errors::CacheError;

/// Lookup is the result of probing a [`Storage`] for a key.
///
/// `Expired` carries the stale value alongside the signal that it is no longer fresh.
/// [`crate::cache::cachex::Cachex`] keeps that value around and may deliver it if the refresh fails.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Lookup<Value> {
    Hit(Value),
    Expired(Value),
    Missing,
}

impl<Value> Lookup<Value> {
    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit(_))
    }
}

/// Capabilities describe the optional operations a [`Storage`] implements.
/// [`crate::cache::cachex::Cachex`] reads them once, when it is created.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Capabilities {
    pub deletable: bool,
    pub ttl_overridable: bool,
}

impl Capabilities {
    pub fn basic() -> Self {
        Capabilities::default()
    }

    pub fn all() -> Self {
        Capabilities { deletable: true, ttl_overridable: true }
    }
}

/// Storage is the contract between [`crate::cache::cachex::Cachex`] and the place where values are kept.
///
/// `get` and `set` are required. `delete` and `set_with_ttl` are optional: an implementation which
/// supports them overrides the methods and advertises them through `capabilities`.
/// Any failure other than absence or expiry is returned as [`CacheError::Storage`].
pub trait Storage<Key, Value>: Send + Sync {
    fn get(&self, key: &Key) -> Result<Lookup<Value>, CacheError>;

    fn set(&self, key: Key, value: Value) -> Result<(), CacheError>;

    fn capabilities(&self) -> Capabilities {
        Capabilities::basic()
    }

    fn delete(&self, _key: &Key) -> Result<(), CacheError> {
        Err(CacheError::Unsupported("delete"))
    }

    fn set_with_ttl(&self, _key: Key, _value: Value, _time_to_live: Duration) -> Result<(), CacheError> {
        Err(CacheError::Unsupported("set_with_ttl"))
    }
}
