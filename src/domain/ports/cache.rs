//! Cache store port.

use std::time::Duration;

use async_trait::async_trait;

use super::errors::CacheError;

/// Byte-oriented key-value cache with per-entry expiration.
///
/// Implementations must be safe to call from multiple concurrent callers.
/// `get`/`set` are infallible by contract (a backend that cannot store an
/// entry simply behaves as a miss); `delete` and `clear` report failures
/// so callers can log them.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up `key`. `None` means miss.
    async fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store `value` under `key`, expiring after `ttl`.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration);

    /// Drop `key` if present.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Drop every entry.
    async fn clear(&self) -> Result<(), CacheError>;
}

/// A no-op cache store: every lookup misses, every store is discarded.
///
/// This is the default wiring when no caching backend is configured,
/// which keeps caching purely an optimization rather than a correctness
/// dependency.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCacheStore;

impl NullCacheStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheStore for NullCacheStore {
    async fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) {}

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        Ok(())
    }
}
