use std::time::SystemTime;

use crate::cache::types::ExpireAfter;

pub type ClockType = Box<dyn Clock + Send + Sync>;

/// Clock is the source of time for the expiry decisions made by [`crate::cache::lru::LruStorage`].
/// `SystemClock` is used by default; tests plug in clocks which are fixed or can be moved forward.
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;

    /// An entry expires the moment `now` reaches its expiry, not after it.
    fn has_reached(&self, time: &ExpireAfter) -> bool {
        self.now().ge(time)
    }
}

#[derive(Clone)]
pub struct SystemClock {}

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

impl SystemClock {
    pub fn new() -> SystemClock {
        SystemClock {}
    }

    pub fn boxed() -> ClockType {
        Box::new(SystemClock::new())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        SystemClock::new()
    }
}
