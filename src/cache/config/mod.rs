use crate::cache::querier::Querier;
use crate::cache::storage::Storage;

pub type StorageType<Key, Value> = Box<dyn Storage<Key, Value>>;
pub type QuerierType<Key, Value> = Box<dyn Querier<Key, Value>>;

const USE_STALE_WHEN_ERROR: bool = false;

/// Config for [`crate::cache::cachex::Cachex`].
/// `storage` is required.
/// `querier` is optional: without it, every miss ends in [`crate::cache::errors::CacheError::NotFound`].
/// `use_stale_when_error` delivers an expired value when its refresh fails, off by default.
pub struct Config<Key, Value>
    where Key: 'static,
          Value: 'static {
    pub storage: StorageType<Key, Value>,
    pub querier: Option<QuerierType<Key, Value>>,
    pub use_stale_when_error: bool,
}

pub struct ConfigBuilder<Key, Value>
    where Key: 'static,
          Value: 'static {
    storage: StorageType<Key, Value>,
    querier: Option<QuerierType<Key, Value>>,
    use_stale_when_error: bool,
}

impl<Key, Value> ConfigBuilder<Key, Value>
    where Key: 'static,
          Value: 'static {
    pub fn new<S>(storage: S) -> Self
        where S: Storage<Key, Value> + 'static {
        ConfigBuilder {
            storage: Box::new(storage),
            querier: None,
            use_stale_when_error: USE_STALE_WHEN_ERROR,
        }
    }

    pub fn querier<Q>(mut self, querier: Q) -> ConfigBuilder<Key, Value>
        where Q: Querier<Key, Value> + 'static {
        self.querier = Some(Box::new(querier));
        self
    }

    pub fn use_stale_when_error(mut self, use_stale: bool) -> ConfigBuilder<Key, Value> {
        self.use_stale_when_error = use_stale;
        self
    }

    pub fn build(self) -> Config<Key, Value> {
        Config {
            storage: self.storage,
            querier: self.querier,
            use_stale_when_error: self.use_stale_when_error,
        }
    }
}
