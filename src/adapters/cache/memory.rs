//! In-memory cache store backed by moka.
//!
//! Entries carry their own TTL, applied through moka's `Expiry` policy,
//! so different operations can cache with different lifetimes in one
//! store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;

use crate::domain::ports::{CacheError, CacheStore};

/// Maximum number of cached entries.
const DEFAULT_MAX_CAPACITY: u64 = 10_000;

#[derive(Clone)]
struct Entry {
    bytes: Arc<Vec<u8>>,
    ttl: Duration,
}

struct PerEntryExpiry;

impl Expiry<String, Entry> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Concurrent in-memory [`CacheStore`].
pub struct MemoryCacheStore {
    cache: Cache<String, Entry>,
}

impl MemoryCacheStore {
    /// Create a store with the default capacity bound.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY)
    }

    /// Create a store bounded to `max_capacity` entries.
    pub fn with_capacity(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryExpiry)
            .build();
        Self { cache }
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.cache
            .get(key)
            .await
            .map(|entry| entry.bytes.as_ref().clone())
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) {
        let entry = Entry {
            bytes: Arc::new(value),
            ttl,
        };
        self.cache.insert(key.to_string(), entry).await;
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.cache.invalidate_all();
        Ok(())
    }
}
