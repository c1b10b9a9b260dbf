//! OTP Module
//!
//! The OTP lifecycle: code generation, time-bounded storage and validation
//! with single-use consumption.
//!
//! - [`OtpStore`] maps identifiers to storage keys over a [`crate::cache::CacheBackend`]
//! - [`OtpEngine`] owns generation policy and the validation state machine

mod code;
mod engine;
mod record;
mod result;
mod store;


pub use code::{codes_match, generate_code};
pub use engine::{
    OtpConfig, OtpEngine, DEFAULT_CODE_LENGTH, DEFAULT_EXPIRY_MINUTES, GRACE_MINUTES,
    MAX_CODE_LENGTH, MAX_EXPIRY_MINUTES,
};
pub use record::{OtpRecord, StoreKey, MAX_IDENTIFIER_LENGTH, STORE_KEY_PREFIX};
pub use result::ValidationResult;
pub use store::OtpStore;
