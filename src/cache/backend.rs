//! Key/value backend contract and its error type.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to a cache backend.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    Connection(String),
    #[error("cache serialization error: {0}")]
    Serialization(String),
    #[error("cache backend error: {0}")]
    Backend(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Opaque string storage with expiry and glob-pattern bulk deletion.
///
/// Values are already serialized by the caller; backends never interpret them.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// `Ok(None)` on a miss or an expired entry.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Delete every key matching a glob pattern in one bulk operation.
    /// Returns the number of keys removed; zero matches is not an error.
    async fn delete_pattern(&self, pattern: &str) -> CacheResult<u64>;

    async fn health_check(&self) -> CacheResult<bool>;

    fn provider_name(&self) -> &'static str;
}
