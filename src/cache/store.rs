//! Best-effort typed access to a [`CacheBackend`].
//!
//! Values are JSON-encoded on the way in and decoded into the caller's target shape
//! on the way out. Nothing here returns an error to the caller: backend failures and
//! shape mismatches are logged, counted and reported as a miss or a no-op.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::backend::{CacheBackend, CacheError};

pub const METRIC_CACHE_HIT: &str = "catalog_cache_hit_total";
pub const METRIC_CACHE_MISS: &str = "catalog_cache_miss_total";
pub const METRIC_CACHE_ERROR: &str = "catalog_cache_error_total";
pub const METRIC_CACHE_EVICTED: &str = "catalog_cache_evicted_total";

/// Outcome of a typed read, before failures are collapsed into misses.
#[derive(Debug)]
pub enum CacheLookup<T> {
    Hit(T),
    Miss,
    Failed(CacheError),
}

#[derive(Clone)]
pub struct CacheStore {
    backend: Arc<dyn CacheBackend>,
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("backend", &self.backend.provider_name())
            .finish()
    }
}

impl CacheStore {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    pub fn provider_name(&self) -> &'static str {
        self.backend.provider_name()
    }

    /// Read and decode `key`, keeping failures distinguishable from misses.
    pub async fn lookup<T: DeserializeOwned>(&self, key: &str) -> CacheLookup<T> {
        let raw = match self.backend.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                counter!(METRIC_CACHE_MISS).increment(1);
                debug!(key, outcome = "miss", "cache lookup");
                return CacheLookup::Miss;
            }
            Err(err) => {
                counter!(METRIC_CACHE_ERROR, "op" => "get").increment(1);
                return CacheLookup::Failed(err);
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                counter!(METRIC_CACHE_HIT).increment(1);
                debug!(key, outcome = "hit", "cache lookup");
                CacheLookup::Hit(value)
            }
            Err(err) => {
                counter!(METRIC_CACHE_ERROR, "op" => "decode").increment(1);
                CacheLookup::Failed(CacheError::Serialization(err.to_string()))
            }
        }
    }

    /// Read and decode `key`; any failure is logged and treated as absent.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.lookup(key).await {
            CacheLookup::Hit(value) => Some(value),
            CacheLookup::Miss => None,
            CacheLookup::Failed(err) => {
                warn!(
                    key,
                    provider = self.provider_name(),
                    error = %err,
                    "cache read failed; treating as miss"
                );
                None
            }
        }
    }

    /// Encode and store `value` for `ttl`. Failures are logged and dropped.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl: Duration) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(err) => {
                counter!(METRIC_CACHE_ERROR, "op" => "encode").increment(1);
                warn!(key, error = %err, "failed to encode cache value; skipping write");
                return;
            }
        };

        match self.backend.set(key, &encoded, ttl).await {
            Ok(()) => debug!(key, ttl_seconds = ttl.as_secs(), "cache set"),
            Err(err) => {
                counter!(METRIC_CACHE_ERROR, "op" => "set").increment(1);
                warn!(
                    key,
                    provider = self.provider_name(),
                    error = %err,
                    "cache write failed; continuing without cache"
                );
            }
        }
    }

    /// Delete every key matching `pattern`, returning how many were removed.
    pub async fn evict_by_pattern(&self, pattern: &str) -> u64 {
        match self.backend.delete_pattern(pattern).await {
            Ok(evicted) => {
                counter!(METRIC_CACHE_EVICTED).increment(evicted);
                info!(pattern, evicted, "evicted cached listings");
                evicted
            }
            Err(err) => {
                counter!(METRIC_CACHE_ERROR, "op" => "evict").increment(1);
                warn!(
                    pattern,
                    provider = self.provider_name(),
                    error = %err,
                    "cache eviction failed; entries expire by ttl"
                );
                0
            }
        }
    }

    pub async fn health_check(&self) -> bool {
        match self.backend.health_check().await {
            Ok(healthy) => healthy,
            Err(err) => {
                warn!(provider = self.provider_name(), error = %err, "cache health check failed");
                false
            }
        }
    }
}
