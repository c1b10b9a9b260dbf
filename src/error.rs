//! Error types for the OTP server
//!
//! Provides unified error handling using thiserror. Validation outcomes
//! (empty, expired, invalid, valid) are not errors and live in
//! [`crate::otp::ValidationResult`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == OTP Error Enum ==
/// Unified error type for the OTP server.
#[derive(Error, Debug)]
pub enum OtpError {
    /// Operation invoked without a usable identifier, or with a bad OtpConfig
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Backing store failed to read, write or decode a record
    #[error("Storage error: {0}")]
    Storage(String),

    /// No record exists for the identifier
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Notifier could not accept the message
    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl From<serde_json::Error> for OtpError {
    fn from(err: serde_json::Error) -> Self {
        OtpError::Storage(format!("record codec failed: {}", err))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for OtpError {
    fn into_response(self) -> Response {
        let status = match &self {
            OtpError::Configuration(_) | OtpError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            OtpError::NotFound(_) => StatusCode::NOT_FOUND,
            OtpError::Delivery(_) => StatusCode::BAD_GATEWAY,
            OtpError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the OTP server.
pub type Result<T> = std::result::Result<T, OtpError>;
