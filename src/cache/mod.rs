pub mod cachex;
pub mod clock;
pub mod config;
pub mod errors;
pub mod lru;
pub mod querier;
pub mod sentinel;
pub mod stats;
pub mod storage;
pub mod types;
