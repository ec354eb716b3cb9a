//! In-process LRU backend with per-entry expiry.
//!
//! Suitable for a single instance; evictions do not propagate to other processes.

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;

use crate::cache::backend::{CacheBackend, CacheError, CacheResult};
use crate::cache::lock::mutex_lock;
use crate::cache::pattern::glob_matches;

const PROVIDER: &str = "memory";

#[derive(Debug)]
struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct MemoryCacheBackend {
    entries: Mutex<LruCache<String, MemoryEntry>>,
}

impl MemoryCacheBackend {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        mutex_lock(&self.entries, PROVIDER, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheBackend for MemoryCacheBackend {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut entries = mutex_lock(&self.entries, PROVIDER, "get");
        let now = Instant::now();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
            Some(_) => {}
            None => return Ok(None),
        }
        entries.pop(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let expires_at = Instant::now().checked_add(ttl).ok_or_else(|| {
            CacheError::Backend(format!(
                "ttl of {}s is out of range for `{key}`",
                ttl.as_secs()
            ))
        })?;
        let entry = MemoryEntry {
            value: value.to_string(),
            expires_at,
        };
        mutex_lock(&self.entries, PROVIDER, "set").put(key.to_string(), entry);
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> CacheResult<u64> {
        let mut entries = mutex_lock(&self.entries, PROVIDER, "delete_pattern");
        let matching: Vec<String> = entries
            .iter()
            .filter(|(key, _)| glob_matches(pattern, key))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &matching {
            entries.pop(key.as_str());
        }
        Ok(matching.len() as u64)
    }

    async fn health_check(&self) -> CacheResult<bool> {
        Ok(true)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
