//! Cache backend selection at startup.

use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::CacheBackend;
use crate::cache::providers::{MemoryCacheBackend, NoOpCacheBackend, RedisCacheBackend};
use crate::config::{CacheBackendKind, CacheSettings};

/// Build the configured backend. An unreachable Redis degrades to the no-op
/// backend so the service still answers from the store.
pub async fn build_cache_backend(settings: &CacheSettings) -> Arc<dyn CacheBackend> {
    if !settings.enabled {
        info!("listing cache disabled by configuration");
        return Arc::new(NoOpCacheBackend);
    }

    match settings.backend {
        CacheBackendKind::None => {
            info!(backend = "none", "listing cache runs without a backend");
            Arc::new(NoOpCacheBackend)
        }
        CacheBackendKind::Memory => {
            info!(
                backend = "memory",
                capacity = settings.memory_capacity.get(),
                "in-process listing cache initialized"
            );
            Arc::new(MemoryCacheBackend::new(settings.memory_capacity))
        }
        CacheBackendKind::Redis => {
            let Some(url) = settings.redis_url.as_deref() else {
                warn!("redis backend selected without a url; using no-op cache");
                return Arc::new(NoOpCacheBackend);
            };
            match RedisCacheBackend::connect(url).await {
                Ok(backend) => {
                    info!(backend = "redis", "redis listing cache initialized");
                    Arc::new(backend)
                }
                Err(err) => {
                    warn!(
                        error = %err,
                        "failed to connect to redis; falling back to no-op cache"
                    );
                    Arc::new(NoOpCacheBackend)
                }
            }
        }
    }
}
