use std::error::Error;
use std::sync::Arc;

use thiserror::Error;

const ERROR_MESSAGE_NOT_FOUND: &str = "not found";
const ERROR_MESSAGE_REFRESH_ABORTED: &str = "refresh was aborted before completing, the caller which owned the refresh has unwound";

pub type SharedError = Arc<dyn Error + Send + Sync>;

/// CacheError defines the errors returned by [`crate::cache::cachex::Cachex`], [`crate::cache::storage::Storage`]
/// and [`crate::cache::querier::Querier`].
///
/// CacheError is `Clone` because the outcome of a single refresh is handed to every caller waiting on it.
/// `Storage` and `Query` wrap the underlying error in an `Arc` and pass it through unchanged.
///
/// An expired entry is not an error: [`crate::cache::storage::Lookup::Expired`] carries the stale value instead.
#[derive(Clone, Debug, Error)]
pub enum CacheError {
    /// The key is neither in the storage nor known to the querier (or no querier is configured).
    #[error("{}", ERROR_MESSAGE_NOT_FOUND)]
    NotFound,
    /// The configured storage does not implement the requested operation.
    #[error("not supported operation: {0}")]
    Unsupported(&'static str),
    #[error("storage error: {0}")]
    Storage(#[source] SharedError),
    #[error("query error: {0}")]
    Query(#[source] SharedError),
    /// Delivered to waiters if the caller performing the refresh unwinds before completing it.
    #[error("{}", ERROR_MESSAGE_REFRESH_ABORTED)]
    RefreshAborted,
}

impl CacheError {
    pub fn storage<E>(error: E) -> Self
        where E: Error + Send + Sync + 'static {
        CacheError::Storage(Arc::new(error))
    }

    pub fn query<E>(error: E) -> Self
        where E: Error + Send + Sync + 'static {
        CacheError::Query(Arc::new(error))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound)
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, CacheError::Unsupported(_))
    }
}
