//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.
//! Every operation takes the caller's notion of `now` so the store never
//! reads a clock itself.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::cache::{CacheEntry, CacheStats, LruTracker, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::{OtpError, Result};

// == Cache Store ==
/// Bounded key-value storage with per-key TTL and LRU eviction.
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    stats: CacheStats,
    max_entries: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
        }
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl`, overwriting any previous entry.
    ///
    /// At capacity, expired entries are swept first; if that frees nothing,
    /// the least recently used entry is evicted.
    pub fn set(&mut self, key: &str, value: String, ttl: Duration, now: DateTime<Utc>) -> Result<()> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(OtpError::Storage(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }
        if value.len() > MAX_VALUE_SIZE {
            return Err(OtpError::Storage(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            OtpError::Storage(format!("TTL of {} is out of range", ttl))
        })?;

        if !self.entries.contains_key(key) && self.entries.len() >= self.max_entries {
            self.cleanup_expired(now);
        }

        if !self.entries.contains_key(key) && self.entries.len() >= self.max_entries {
            match self.lru.evict_oldest() {
                Some(evicted) => {
                    self.entries.remove(&evicted);
                    self.stats.record_eviction();
                }
                None => {
                    return Err(OtpError::Storage(
                        "Cache is full and eviction failed".to_string(),
                    ))
                }
            }
        }

        self.entries
            .insert(key.to_string(), CacheEntry::new(value, expires_at));
        self.lru.touch(key);

        Ok(())
    }

    // == Get ==
    /// Returns the live value for `key`.
    ///
    /// An entry past its TTL is dropped and reported as absent.
    pub fn get(&mut self, key: &str, now: DateTime<Utc>) -> Option<String> {
        if self.drop_if_expired(key, now) {
            self.stats.record_miss();
            return None;
        }

        match self.entries.get(key) {
            Some(entry) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                self.lru.touch(key);
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Contains ==
    /// True if a live entry exists for `key`. Does not count as a read.
    pub fn contains(&mut self, key: &str, now: DateTime<Utc>) -> bool {
        if self.drop_if_expired(key, now) {
            return false;
        }
        self.entries.contains_key(key)
    }

    // == Delete ==
    /// Removes `key`. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            true
        } else {
            false
        }
    }

    // == Delete If ==
    /// Removes `key` only if it holds a live entry whose value equals `expected`.
    pub fn delete_if(&mut self, key: &str, expected: &str, now: DateTime<Utc>) -> bool {
        if self.drop_if_expired(key, now) {
            return false;
        }
        match self.entries.get(key) {
            Some(entry) if entry.value == expected => self.delete(key),
            _ => false,
        }
    }

    // == Cleanup Expired ==
    /// Removes every entry past its TTL. Returns how many were removed.
    pub fn cleanup_expired(&mut self, now: DateTime<Utc>) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        self.stats.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn drop_if_expired(&mut self, key: &str, now: DateTime<Utc>) -> bool {
        let expired = self
            .entries
            .get(key)
            .map(|entry| entry.is_expired_at(now))
            .unwrap_or(false);

        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expirations(1);
        }
        expired
    }
}
