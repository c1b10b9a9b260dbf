//! OTP record and storage key types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::MAX_KEY_LENGTH;
use crate::error::{OtpError, Result};

/// Prefix joined to every identifier to form its storage key.
pub const STORE_KEY_PREFIX: &str = "otp";

/// Longest identifier whose key still fits the backend key limit.
pub const MAX_IDENTIFIER_LENGTH: usize = MAX_KEY_LENGTH - STORE_KEY_PREFIX.len() - 1;

// == OTP Record ==
/// The persisted unit: one code and the instant it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Fixed-width run of decimal digits, leading zeros kept
    pub code: String,
    /// Semantic expiry; the backend TTL is longer than this
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    pub fn new(code: String, expires_at: DateTime<Utc>) -> Self {
        Self { code, expires_at }
    }

    /// True once `now` is strictly after `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

// == Store Key ==
/// Storage key derived from a caller identifier: `otp_<identifier>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreKey(String);

impl StoreKey {
    /// Builds the key for `identifier`.
    ///
    /// An empty identifier, or one longer than [`MAX_IDENTIFIER_LENGTH`]
    /// bytes, is a caller bug and is reported as [`OtpError::Configuration`].
    pub fn new(identifier: &str) -> Result<Self> {
        if identifier.is_empty() {
            return Err(OtpError::Configuration(
                "No OTP identifier set".to_string(),
            ));
        }
        if identifier.len() > MAX_IDENTIFIER_LENGTH {
            return Err(OtpError::Configuration(format!(
                "OTP identifier exceeds {} bytes",
                MAX_IDENTIFIER_LENGTH
            )));
        }
        Ok(Self(format!("{}_{}", STORE_KEY_PREFIX, identifier)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_store_key_format() {
        let key = StoreKey::new("+15551234567").unwrap();
        assert_eq!(key.as_str(), "otp_+15551234567");
    }

    #[test]
    fn test_store_key_rejects_empty_identifier() {
        assert!(matches!(StoreKey::new(""), Err(OtpError::Configuration(_))));
    }

    #[test]
    fn test_store_key_length_limit() {
        let longest = "a".repeat(MAX_IDENTIFIER_LENGTH);
        let key = StoreKey::new(&longest).unwrap();
        assert_eq!(key.as_str().len(), MAX_KEY_LENGTH);

        let too_long = "a".repeat(MAX_IDENTIFIER_LENGTH + 1);
        assert!(matches!(
            StoreKey::new(&too_long),
            Err(OtpError::Configuration(_))
        ));
    }

    #[test]
    fn test_record_expiry_is_strict() {
        let expires_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 5, 0).unwrap();
        let record = OtpRecord::new("012345".to_string(), expires_at);

        assert!(!record.is_expired_at(expires_at - Duration::seconds(1)));
        assert!(!record.is_expired_at(expires_at));
        assert!(record.is_expired_at(expires_at + Duration::milliseconds(1)));
    }

    #[test]
    fn test_record_json_shape() {
        let expires_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 5, 0).unwrap();
        let record = OtpRecord::new("007007".to_string(), expires_at);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["code"], "007007");
        assert_eq!(json["expires_at"], "2024-01-01T12:05:00Z");
    }
}
