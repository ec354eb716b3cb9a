//! Backend that stores nothing; every read misses.
//!
//! Used when caching is disabled or Redis cannot be reached at startup.

use std::time::Duration;

use async_trait::async_trait;

use crate::cache::backend::{CacheBackend, CacheResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCacheBackend;

#[async_trait]
impl CacheBackend for NoOpCacheBackend {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    async fn delete_pattern(&self, _pattern: &str) -> CacheResult<u64> {
        Ok(0)
    }

    async fn health_check(&self) -> CacheResult<bool> {
        Ok(true)
    }

    fn provider_name(&self) -> &'static str {
        "noop"
    }
}
