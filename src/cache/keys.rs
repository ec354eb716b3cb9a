//! Deterministic cache key construction.
//!
//! A key is `<prefix><operation>` followed by `:<name>:<value>` for every
//! parameter in caller order. Absent values render as `null`.

use std::borrow::Cow;
use std::fmt::{self, Display};
use std::sync::Arc;

use thiserror::Error;

use super::pattern::escape_glob;

pub const KEY_DELIMITER: char = ':';
pub const NULL_TOKEN: &str = "null";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheKeyError {
    #[error("cache operation tag must not be empty")]
    EmptyOperation,
    #[error("cache key prefix must not be empty")]
    EmptyPrefix,
}

/// Non-empty tag naming the operation whose results a key stores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheOperation(Cow<'static, str>);

impl CacheOperation {
    /// Unfiltered product listing.
    pub const LIST_ALL: CacheOperation = CacheOperation::from_static("all");
    /// Listing filtered by category.
    pub const BY_CATEGORY: CacheOperation = CacheOperation::from_static("filter");

    pub const fn from_static(tag: &'static str) -> Self {
        assert!(!tag.is_empty(), "cache operation tag must not be empty");
        Self(Cow::Borrowed(tag))
    }

    pub fn new(tag: impl Into<String>) -> Result<Self, CacheKeyError> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(CacheKeyError::EmptyOperation);
        }
        Ok(Self(Cow::Owned(tag)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CacheOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named parameter of a key. Order of parameters is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParam {
    name: &'static str,
    value: Option<String>,
}

impl KeyParam {
    pub fn new(name: &'static str, value: impl Display) -> Self {
        Self {
            name,
            value: Some(value.to_string()),
        }
    }

    pub fn optional<V: Display>(name: &'static str, value: Option<V>) -> Self {
        Self {
            name,
            value: value.map(|value| value.to_string()),
        }
    }
}

/// Builds keys under a fixed per-deployment prefix.
#[derive(Debug, Clone)]
pub struct CacheKeyBuilder {
    prefix: Arc<str>,
}

impl CacheKeyBuilder {
    pub fn new(prefix: impl Into<String>) -> Result<Self, CacheKeyError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(CacheKeyError::EmptyPrefix);
        }
        Ok(Self {
            prefix: Arc::from(prefix),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn build_key(&self, operation: &CacheOperation, params: &[KeyParam]) -> String {
        let mut key = String::with_capacity(self.prefix.len() + operation.as_str().len() + 32);
        key.push_str(&self.prefix);
        key.push_str(operation.as_str());
        for param in params {
            key.push(KEY_DELIMITER);
            key.push_str(param.name);
            key.push(KEY_DELIMITER);
            match param.value.as_deref() {
                Some(value) => key.push_str(value),
                None => key.push_str(NULL_TOKEN),
            }
        }
        key
    }

    /// Glob matching every key this builder can produce, and nothing outside the prefix.
    pub fn namespace_pattern(&self) -> String {
        let mut pattern = escape_glob(&self.prefix);
        pattern.push('*');
        pattern
    }
}
