use std::time::SystemTime;

/// Defines type for the capacity of the LRU storage in terms of the number of entries it may hold, 0 means unbounded
pub type TotalCapacity = usize;

/// Defines the type for the point in time after which an entry is considered expired
pub type ExpireAfter = SystemTime;

/// Defines the type for the logical access time of an entry inside the LRU storage
pub(crate) type AccessStamp = u64;
