//! Cache-aside building blocks for product listings.
//!
//! - [`CacheKeyBuilder`] derives deterministic keys under a deployment prefix.
//! - [`PageSnapshot`] is the serializable copy of a result page.
//! - [`CacheStore`] wraps a [`CacheBackend`] with best-effort typed reads and writes.
//!
//! Backends live in [`providers`]: Redis for shared deployments, an in-process LRU,
//! and a no-op used when caching is off or Redis is unreachable.
//!
//! ```toml
//! [cache]
//! backend = "redis"
//! redis_url = "redis://127.0.0.1:6379"
//! key_prefix = "product-catalog:"
//! default_ttl_seconds = 300
//!
//! [cache.ttl_overrides]
//! all = 120
//! filter = 600
//! ```

mod backend;
mod config;
mod keys;
mod lock;
mod pattern;
pub mod providers;
mod snapshot;
mod store;

pub use backend::{CacheBackend, CacheError, CacheResult};
pub use config::CacheConfig;
pub use keys::{CacheKeyBuilder, CacheKeyError, CacheOperation, KeyParam, NULL_TOKEN};
pub use pattern::{escape_glob, glob_matches};
pub use snapshot::PageSnapshot;
pub use store::{
    CacheLookup, CacheStore, METRIC_CACHE_ERROR, METRIC_CACHE_EVICTED, METRIC_CACHE_HIT,
    METRIC_CACHE_MISS,
};
