//! Typed read-through wrapper over a [`CacheStore`].
//!
//! Memoizes repository reads behind typed keys: a hit deserializes into
//! the declared result type without invoking the loader; a miss runs the
//! loader and stores the encoded result under the key with the given TTL.
//!
//! There is deliberately no single-flight de-duplication: concurrent
//! misses for the same key may each invoke the loader and each write the
//! cache (last write wins). Serialization is pushed down to the storage
//! layer, matching the request-parallel execution model.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::key::CacheKey;
use crate::domain::errors::ServiceResult;
use crate::domain::ports::{CacheStore, NullCacheStore};

/// Read-through cache shared by the entity services.
#[derive(Clone)]
pub struct ReadThroughCache {
    store: Arc<dyn CacheStore>,
}

impl ReadThroughCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// A wrapper over the no-op store: every read loads, every write is
    /// discarded. The default for services without a configured backend.
    pub fn disabled() -> Self {
        Self::new(Arc::new(NullCacheStore::new()))
    }

    /// Return the value cached under `key`, or load, store, and return it.
    ///
    /// The loader's error propagates untouched and nothing is written on
    /// failure; at most one cache write happens per successful load. An
    /// entry that no longer decodes as `T` is treated as a miss.
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        key: &CacheKey,
        ttl: Duration,
        loader: F,
    ) -> ServiceResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ServiceResult<T>>,
    {
        if let Some(bytes) = self.store.get(key.as_str()).await {
            match serde_json::from_slice(&bytes) {
                Ok(value) => {
                    debug!(key = %key, "cache hit");
                    return Ok(value);
                }
                Err(error) => {
                    warn!(key = %key, %error, "discarding undecodable cache entry");
                }
            }
        }

        let value = loader().await?;

        match serde_json::to_vec(&value) {
            Ok(bytes) => self.store.set(key.as_str(), bytes, ttl).await,
            // An unencodable value is a programming error in the cached
            // type; the loaded value is still correct, so serve it.
            Err(error) => warn!(key = %key, %error, "failed to encode value for cache"),
        }

        Ok(value)
    }

    /// Delete the given keys. Failures are logged and swallowed: cache
    /// invalidation must never fail the write that triggered it.
    pub async fn invalidate(&self, keys: &[CacheKey]) {
        for key in keys {
            if let Err(error) = self.store.delete(key.as_str()).await {
                warn!(key = %key, %error, "cache invalidation failed");
            }
        }
    }

    /// Drop every entry. Blunt fallback for listings whose keys cannot be
    /// enumerated; failures are logged and swallowed.
    pub async fn invalidate_all(&self) {
        if let Err(error) = self.store.clear().await {
            warn!(%error, "cache clear failed");
        }
    }
}
