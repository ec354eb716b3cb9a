//! Listing cache settings: key namespace and entry lifetimes.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::{CacheSettings, DEFAULT_CACHE_KEY_PREFIX, DEFAULT_CACHE_TTL_SECS};

use super::keys::CacheOperation;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub key_prefix: String,
    pub default_ttl: Duration,
    /// Per-operation lifetimes keyed by operation tag.
    pub ttl_overrides: BTreeMap<String, Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_CACHE_KEY_PREFIX.to_string(),
            default_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            ttl_overrides: BTreeMap::new(),
        }
    }
}

impl From<&CacheSettings> for CacheConfig {
    fn from(settings: &CacheSettings) -> Self {
        Self {
            key_prefix: settings.key_prefix.clone(),
            default_ttl: settings.default_ttl,
            ttl_overrides: settings.ttl_overrides.clone(),
        }
    }
}

impl CacheConfig {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn with_ttl(mut self, operation: &CacheOperation, ttl: Duration) -> Self {
        self.ttl_overrides
            .insert(operation.as_str().to_string(), ttl);
        self
    }

    /// Lifetime for entries written by `operation`, falling back to the default.
    pub fn ttl_for(&self, operation: &CacheOperation) -> Duration {
        self.ttl_overrides
            .get(operation.as_str())
            .copied()
            .unwrap_or(self.default_ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_default() {
        let config = CacheConfig::default()
            .with_ttl(&CacheOperation::LIST_ALL, Duration::from_secs(120));
        assert_eq!(
            config.ttl_for(&CacheOperation::LIST_ALL),
            Duration::from_secs(120)
        );
        assert_eq!(
            config.ttl_for(&CacheOperation::BY_CATEGORY),
            Duration::from_secs(DEFAULT_CACHE_TTL_SECS)
        );
    }
}
