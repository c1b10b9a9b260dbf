//! OTP Engine
//!
//! Owns code generation policy, expiry computation and the validation
//! state machine. Holds no per-call state: the identifier travels with
//! every call and configuration is fixed per engine (or passed explicitly
//! through [`OtpEngine::generate_with`]).

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::{OtpError, Result};
use crate::notify::mask_recipient;
use crate::otp::code::{codes_match, generate_code};
use crate::otp::{OtpRecord, OtpStore, ValidationResult};

/// Default number of digits in a generated code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Default semantic validity window in minutes
pub const DEFAULT_EXPIRY_MINUTES: i64 = 5;

/// Upper bound on code width
pub const MAX_CODE_LENGTH: usize = 32;

/// Upper bound on the validity window: one year
pub const MAX_EXPIRY_MINUTES: i64 = 365 * 24 * 60;

/// Extra minutes the backend keeps a record past its semantic expiry,
/// so an expired record is still there to be classified as expired.
pub const GRACE_MINUTES: i64 = 2;

// == OTP Config ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpConfig {
    /// Digits per generated code
    pub code_length: usize,
    /// Minutes a code stays valid after generation
    pub expiry_minutes: i64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            expiry_minutes: DEFAULT_EXPIRY_MINUTES,
        }
    }
}

impl OtpConfig {
    pub fn new(code_length: usize, expiry_minutes: i64) -> Self {
        Self {
            code_length,
            expiry_minutes,
        }
    }

    /// Rejects widths outside `1..=MAX_CODE_LENGTH` and expiry outside
    /// `1..=MAX_EXPIRY_MINUTES`.
    pub fn validate(&self) -> Result<()> {
        if self.code_length == 0 || self.code_length > MAX_CODE_LENGTH {
            return Err(OtpError::Configuration(format!(
                "code length must be between 1 and {}, got {}",
                MAX_CODE_LENGTH, self.code_length
            )));
        }
        if self.expiry_minutes <= 0 || self.expiry_minutes > MAX_EXPIRY_MINUTES {
            return Err(OtpError::Configuration(format!(
                "expiry must be between 1 and {} minutes, got {}",
                MAX_EXPIRY_MINUTES, self.expiry_minutes
            )));
        }
        Ok(())
    }

    pub fn expiry(&self) -> Result<Duration> {
        minutes(self.expiry_minutes)
    }

    /// Physical lifetime handed to the backend: expiry plus the grace margin.
    pub fn backend_ttl(&self) -> Result<Duration> {
        self.expiry_minutes
            .checked_add(GRACE_MINUTES)
            .ok_or_else(|| out_of_range(self.expiry_minutes))
            .and_then(minutes)
    }
}

fn minutes(value: i64) -> Result<Duration> {
    Duration::try_minutes(value).ok_or_else(|| out_of_range(value))
}

fn out_of_range(value: i64) -> OtpError {
    OtpError::Configuration(format!("expiry of {} minutes is out of range", value))
}

// == OTP Engine ==
pub struct OtpEngine {
    store: OtpStore,
    clock: Arc<dyn Clock>,
    config: OtpConfig,
}

impl OtpEngine {
    /// Builds an engine, rejecting an invalid `config` up front.
    pub fn new(store: OtpStore, clock: Arc<dyn Clock>, config: OtpConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            clock,
            config,
        })
    }

    pub fn config(&self) -> &OtpConfig {
        &self.config
    }

    // == Generate ==
    /// Issues a fresh code for `identifier` using the engine's configuration.
    ///
    /// Any earlier record for the identifier is overwritten.
    pub async fn generate(&self, identifier: &str) -> Result<OtpRecord> {
        self.generate_with(identifier, &self.config).await
    }

    /// Issues a fresh code using `config` instead of the engine's own.
    pub async fn generate_with(&self, identifier: &str, config: &OtpConfig) -> Result<OtpRecord> {
        config.validate()?;

        let expires_at = self
            .clock
            .now()
            .checked_add_signed(config.expiry()?)
            .ok_or_else(|| out_of_range(config.expiry_minutes))?;
        let ttl = config.backend_ttl()?;

        let record = OtpRecord::new(generate_code(config.code_length), expires_at);
        self.store.put(identifier, &record, ttl).await?;

        debug!(
            "Issued {}-digit code for {} expiring at {}",
            config.code_length,
            mask_recipient(identifier),
            record.expires_at
        );
        Ok(record)
    }

    // == Queries ==
    /// True if a record is stored, whether or not it has semantically expired.
    pub async fn has(&self, identifier: &str) -> Result<bool> {
        self.store.has(identifier).await
    }

    /// True if a record exists and `now` is past its expiry.
    ///
    /// A missing record is not an expired one.
    pub async fn is_expired(&self, identifier: &str) -> Result<bool> {
        let now = self.clock.now();
        Ok(self
            .store
            .get(identifier)
            .await?
            .map(|record| record.is_expired_at(now))
            .unwrap_or(false))
    }

    /// Stored expiry for `identifier`, or [`OtpError::NotFound`].
    pub async fn get_expires(&self, identifier: &str) -> Result<DateTime<Utc>> {
        self.store
            .get(identifier)
            .await?
            .map(|record| record.expires_at)
            .ok_or_else(|| {
                OtpError::NotFound(format!("no OTP issued for {}", mask_recipient(identifier)))
            })
    }

    // == Validate ==
    /// Checks `submitted` against the stored record and consumes it on success.
    ///
    /// Checks run in order: empty, expired, invalid, valid. Only the valid
    /// branch mutates, and it does so with a compare-and-delete so that a
    /// code can be redeemed at most once under concurrent validation.
    pub async fn validate(&self, identifier: &str, submitted: &str) -> Result<ValidationResult> {
        let outcome = match self.store.get(identifier).await? {
            None => ValidationResult::Empty,
            Some(record) if record.is_expired_at(self.clock.now()) => ValidationResult::Expired,
            Some(record) if !codes_match(&record.code, submitted) => ValidationResult::Invalid,
            Some(record) => {
                if self.store.consume(identifier, &record).await? {
                    ValidationResult::Valid
                } else {
                    // Consumed or replaced between read and delete
                    ValidationResult::Empty
                }
            }
        };

        if outcome.is_valid() {
            info!("OTP validated for {}", mask_recipient(identifier));
        } else {
            debug!(
                "OTP validation for {} ended as {}",
                mask_recipient(identifier),
                outcome.message()
            );
        }
        Ok(outcome)
    }

    /// Drops any record for `identifier`. No-op if absent.
    pub async fn clear(&self, identifier: &str) -> Result<()> {
        self.store.clear(identifier).await
    }
}
