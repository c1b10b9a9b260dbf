//! Mini OTP - A lightweight one-time-password server
//!
//! Issues short-lived numeric codes keyed by an identifier, stores them in a
//! TTL cache, and validates them with single-use consumption.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod otp;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{OtpError, Result};
pub use otp::{OtpConfig, OtpEngine, OtpRecord, OtpStore, ValidationResult};
pub use tasks::{spawn_cleanup_task, spawn_delivery_worker};
