use crate::cache::errors::CacheError;

/// Querier fetches the authoritative value for a key on a cache miss.
///
/// A querier which does not know the key returns [`CacheError::NotFound`]; every other failure is
/// passed through to the callers as is. Any `Fn(&Key) -> Result<Value, CacheError>` is a Querier.
pub trait Querier<Key, Value>: Send + Sync {
    fn query(&self, key: &Key) -> Result<Value, CacheError>;
}

impl<Key, Value, QueryFn> Querier<Key, Value> for QueryFn
    where QueryFn: Fn(&Key) -> Result<Value, CacheError> + Send + Sync {
    fn query(&self, key: &Key) -> Result<Value, CacheError> {
        (self)(key)
    }
}
