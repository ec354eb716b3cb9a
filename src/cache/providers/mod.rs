//! Concrete [`CacheBackend`](super::backend::CacheBackend) implementations.

pub mod memory;
pub mod noop;
pub mod redis;

pub use self::memory::MemoryCacheBackend;
pub use self::noop::NoOpCacheBackend;
pub use self::redis::RedisCacheBackend;
