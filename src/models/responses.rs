//! Response DTOs for the OTP server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::CacheStats;
use crate::otp::ValidationResult;

/// Response body for POST /otp. The code itself is never echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub identifier: String,
    pub expires_at: DateTime<Utc>,
    pub message: String,
}

impl GenerateResponse {
    pub fn new(identifier: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            identifier: identifier.into(),
            expires_at,
            message: "OTP issued and queued for delivery".to_string(),
        }
    }
}

/// Response body for POST /otp/validate
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResponse {
    /// True only for a valid, now consumed, code
    pub status: bool,
    /// One of `otp.empty`, `otp.expired`, `otp.invalid`, `otp.valid`
    pub message: String,
}

impl From<ValidationResult> for ValidateResponse {
    fn from(result: ValidationResult) -> Self {
        Self {
            status: result.is_valid(),
            message: result.message().to_string(),
        }
    }
}

/// Response body for GET /otp/:identifier
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub identifier: String,
    pub exists: bool,
    pub expired: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Response body for DELETE /otp/:identifier
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    pub identifier: String,
}

impl ClearResponse {
    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Self {
            message: format!("OTP for '{}' cleared", identifier),
            identifier,
        }
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_response_from_result() {
        let resp = ValidateResponse::from(ValidationResult::Valid);
        assert!(resp.status);
        assert_eq!(resp.message, "otp.valid");

        let resp = ValidateResponse::from(ValidationResult::Expired);
        assert!(!resp.status);
        assert_eq!(resp.message, "otp.expired");
    }

    #[test]
    fn test_generate_response_has_no_code() {
        let resp = GenerateResponse::new("user-1", Utc::now());
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["identifier"], "user-1");
        assert!(json.get("expires_at").is_some());
        assert!(json.get("code").is_none());
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            ..CacheStats::default()
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_status_response_null_expiry() {
        let resp = StatusResponse {
            identifier: "ghost".to_string(),
            exists: false,
            expired: false,
            expires_at: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["expires_at"].is_null());
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
