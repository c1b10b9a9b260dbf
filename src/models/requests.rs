//! Request DTOs for the OTP server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::otp::{OtpConfig, MAX_IDENTIFIER_LENGTH};

/// Request body for POST /otp
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    /// Subject of the challenge (phone number, user id, ...)
    pub identifier: String,
    /// Delivery address; defaults to the identifier
    #[serde(default)]
    pub recipient: Option<String>,
    /// Per-call code width override
    #[serde(default)]
    pub length: Option<usize>,
    /// Per-call validity override in minutes
    #[serde(default)]
    pub expires: Option<i64>,
    /// Extra line placed above the code in the message
    #[serde(default)]
    pub message: Option<String>,
}

/// Shared identifier check for every request that names one.
fn check_identifier(identifier: &str) -> Option<String> {
    if identifier.trim().is_empty() {
        return Some("Identifier cannot be empty".to_string());
    }
    if identifier.len() > MAX_IDENTIFIER_LENGTH {
        return Some(format!(
            "Identifier exceeds maximum length of {} bytes",
            MAX_IDENTIFIER_LENGTH
        ));
    }
    None
}

impl GenerateRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if let Some(error_msg) = check_identifier(&self.identifier) {
            return Some(error_msg);
        }
        if matches!(&self.recipient, Some(r) if r.trim().is_empty()) {
            return Some("Recipient cannot be empty".to_string());
        }
        None
    }

    /// Engine settings for this call: `base` with any overrides applied.
    pub fn otp_config(&self, base: &OtpConfig) -> OtpConfig {
        OtpConfig::new(
            self.length.unwrap_or(base.code_length),
            self.expires.unwrap_or(base.expiry_minutes),
        )
    }

    pub fn recipient(&self) -> &str {
        self.recipient.as_deref().unwrap_or(&self.identifier)
    }
}

/// Request body for POST /otp/validate
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateRequest {
    pub identifier: String,
    pub code: String,
}

impl ValidateRequest {
    pub fn validate(&self) -> Option<String> {
        check_identifier(&self.identifier)
    }
}
