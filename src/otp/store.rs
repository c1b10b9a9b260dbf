//! OTP Store
//!
//! Thin keyed-TTL accessor: namespaces identifiers into storage keys and
//! moves [`OtpRecord`]s in and out of a [`CacheBackend`] as JSON.

use std::sync::Arc;

use chrono::Duration;

use crate::cache::CacheBackend;
use crate::error::Result;
use crate::otp::{OtpRecord, StoreKey};

#[derive(Clone)]
pub struct OtpStore {
    backend: Arc<dyn CacheBackend>,
}

impl OtpStore {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    /// Writes `record` for `identifier`, replacing any previous record.
    pub async fn put(&self, identifier: &str, record: &OtpRecord, ttl: Duration) -> Result<()> {
        let key = StoreKey::new(identifier)?;
        // Encode before touching the backend so a record is never half-written
        let encoded = serde_json::to_string(record)?;
        self.backend.put(key.as_str(), encoded, ttl).await
    }

    /// Reads the record for `identifier`; `None` if absent or evicted.
    pub async fn get(&self, identifier: &str) -> Result<Option<OtpRecord>> {
        let key = StoreKey::new(identifier)?;
        match self.backend.get(key.as_str()).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn has(&self, identifier: &str) -> Result<bool> {
        let key = StoreKey::new(identifier)?;
        self.backend.has(key.as_str()).await
    }

    /// Deletes the record for `identifier`. No-op if absent.
    pub async fn clear(&self, identifier: &str) -> Result<()> {
        let key = StoreKey::new(identifier)?;
        self.backend.forget(key.as_str()).await
    }

    /// Atomically deletes the stored record only if it is still `record`.
    ///
    /// Returns false when the record was already consumed or replaced.
    pub async fn consume(&self, identifier: &str, record: &OtpRecord) -> Result<bool> {
        let key = StoreKey::new(identifier)?;
        let expected = serde_json::to_string(record)?;
        self.backend.forget_if(key.as_str(), &expected).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::clock::{Clock, ManualClock};
    use crate::error::OtpError;

    fn setup() -> (OtpStore, Arc<MemoryCache>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::starting_now());
        let cache = Arc::new(MemoryCache::new(100, clock.clone()));
        (OtpStore::new(cache.clone()), cache, clock)
    }

    fn record(clock: &ManualClock, code: &str) -> OtpRecord {
        OtpRecord::new(code.to_string(), clock.now() + Duration::minutes(5))
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let (store, _, clock) = setup();
        let rec = record(&clock, "123456");

        store.put("alice", &rec, Duration::minutes(7)).await.unwrap();

        assert!(store.has("alice").await.unwrap());
        assert_eq!(store.get("alice").await.unwrap(), Some(rec));
    }

    #[tokio::test]
    async fn test_records_are_namespaced() {
        let (store, cache, clock) = setup();

        store
            .put("alice", &record(&clock, "111111"), Duration::minutes(7))
            .await
            .unwrap();

        assert!(cache.has("otp_alice").await.unwrap());
        assert!(!cache.has("alice").await.unwrap());
        assert!(!store.has("bob").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_absent_is_none() {
        let (store, _, _) = setup();
        assert_eq!(store.get("nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let (store, _, clock) = setup();
        store
            .put("alice", &record(&clock, "111111"), Duration::minutes(7))
            .await
            .unwrap();

        store.clear("alice").await.unwrap();
        store.clear("alice").await.unwrap();

        assert!(!store.has("alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_identifier_is_configuration_error() {
        let (store, cache, clock) = setup();

        let put = store.put("", &record(&clock, "1"), Duration::minutes(7)).await;
        assert!(matches!(put, Err(OtpError::Configuration(_))));
        assert!(matches!(store.get("").await, Err(OtpError::Configuration(_))));
        assert!(matches!(store.has("").await, Err(OtpError::Configuration(_))));
        assert!(matches!(store.clear("").await, Err(OtpError::Configuration(_))));
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_consume_requires_current_record() {
        let (store, _, clock) = setup();
        let old = record(&clock, "111111");
        let new = record(&clock, "222222");

        store.put("alice", &old, Duration::minutes(7)).await.unwrap();
        store.put("alice", &new, Duration::minutes(7)).await.unwrap();

        assert!(!store.consume("alice", &old).await.unwrap());
        assert!(store.has("alice").await.unwrap());

        assert!(store.consume("alice", &new).await.unwrap());
        assert!(!store.has("alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_consume_roundtrips_fetched_record() {
        let (store, _, clock) = setup();
        store
            .put("alice", &record(&clock, "000042"), Duration::minutes(7))
            .await
            .unwrap();

        let fetched = store.get("alice").await.unwrap().unwrap();
        assert!(store.consume("alice", &fetched).await.unwrap());
    }

    #[tokio::test]
    async fn test_undecodable_value_is_storage_error() {
        let (store, cache, _) = setup();
        cache
            .put("otp_alice", "not a record".to_string(), Duration::minutes(7))
            .await
            .unwrap();

        assert!(matches!(store.get("alice").await, Err(OtpError::Storage(_))));
    }
}
