use std::time::Duration;

use crate::cache::clock::ClockType;
use crate::cache::types::{AccessStamp, ExpireAfter};

/// StoredValue is an entry of [`crate::cache::lru::LruStorage`]: the value, its absolute expiry
/// (`None` if it never expires) and the stamp of its most recent access.
pub(crate) struct StoredValue<Value> {
    value: Value,
    expire_after: Option<ExpireAfter>,
    pub(crate) access_stamp: AccessStamp,
}

impl<Value> StoredValue<Value> {
    /// A `time_to_live` of zero, or one too large to be represented as a point in time, means the value never expires.
    pub(crate) fn new(value: Value, time_to_live: Duration, access_stamp: AccessStamp, clock: &ClockType) -> Self {
        let expire_after = if time_to_live.is_zero() {
            None
        } else {
            clock.now().checked_add(time_to_live)
        };
        StoredValue {
            value,
            expire_after,
            access_stamp,
        }
    }

    pub(crate) fn is_alive(&self, clock: &ClockType) -> bool {
        if let Some(expire_after) = self.expire_after() {
            return !clock.has_reached(&expire_after);
        }
        true
    }

    pub(crate) fn expire_after(&self) -> Option<ExpireAfter> {
        self.expire_after
    }
}

impl<Value> StoredValue<Value>
    where Value: Clone {
    pub(crate) fn value(&self) -> Value {
        self.value.clone()
    }
}
