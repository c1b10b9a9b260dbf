//! Cache Backend Module
//!
//! The key-value contract the OTP store is written against, and the
//! in-memory implementation shipped with the server.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore};
use crate::clock::Clock;
use crate::error::Result;

/// Key-value store with per-key TTL.
///
/// Each call must be atomic with respect to other calls on the same key.
/// The TTL is advisory cleanup; semantic expiry is decided by the caller.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Writes `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    /// Reads the live value under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// True if a live value exists under `key`.
    async fn has(&self, key: &str) -> Result<bool>;

    /// Deletes `key`. No-op if absent.
    async fn forget(&self, key: &str) -> Result<()>;

    /// Deletes `key` only if its live value equals `expected`.
    ///
    /// Returns whether the delete happened. Must be a single atomic step.
    async fn forget_if(&self, key: &str, expected: &str) -> Result<bool>;
}

// == Memory Cache ==
/// In-process [`CacheBackend`] over a lock-guarded [`CacheStore`].
#[derive(Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<CacheStore>>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new(max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries))),
            clock,
        }
    }

    /// Sweeps entries whose TTL has elapsed. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        self.store.write().await.cleanup_expired(now)
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let now = self.clock.now();
        self.store.write().await.set(key, value, ttl, now)
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = self.clock.now();
        // Write lock: reads update LRU order and stats
        Ok(self.store.write().await.get(key, now))
    }

    async fn has(&self, key: &str) -> Result<bool> {
        let now = self.clock.now();
        Ok(self.store.write().await.contains(key, now))
    }

    async fn forget(&self, key: &str) -> Result<()> {
        self.store.write().await.delete(key);
        Ok(())
    }

    async fn forget_if(&self, key: &str, expected: &str) -> Result<bool> {
        let now = self.clock.now();
        Ok(self.store.write().await.delete_if(key, expected, now))
    }
}
