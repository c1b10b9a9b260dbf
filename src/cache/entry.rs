//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// A stored value plus the instant the backend stops serving it.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value (an encoded record)
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(value: String, expires_at: DateTime<Utc>) -> Self {
        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: the entry is expired once `now` reaches
    /// `expires_at`, so a TTL of zero is never readable.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
