//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::otp::{OtpConfig, DEFAULT_CODE_LENGTH, DEFAULT_EXPIRY_MINUTES};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Digits per generated code
    pub otp_length: usize,
    /// Minutes a generated code stays valid
    pub otp_expires: i64,
    /// Maximum number of OTP records held at once
    pub max_entries: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Capacity of the notification queue
    pub delivery_queue: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `OTP_LENGTH` - Digits per code (default: 6)
    /// - `OTP_EXPIRES` - Code validity in minutes (default: 5)
    /// - `MAX_ENTRIES` - Maximum stored records (default: 10000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 30)
    /// - `DELIVERY_QUEUE` - Notification queue capacity (default: 256)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            otp_length: env_or("OTP_LENGTH", defaults.otp_length),
            otp_expires: env_or("OTP_EXPIRES", defaults.otp_expires),
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            delivery_queue: env_or("DELIVERY_QUEUE", defaults.delivery_queue),
        }
    }

    /// OTP engine settings carried by this configuration.
    pub fn otp(&self) -> OtpConfig {
        OtpConfig::new(self.otp_length, self.otp_expires)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            otp_length: DEFAULT_CODE_LENGTH,
            otp_expires: DEFAULT_EXPIRY_MINUTES,
            max_entries: 10_000,
            server_port: 3000,
            cleanup_interval: 30,
            delivery_queue: 256,
        }
    }
}

/// Parses `name` from the environment, falling back when unset or unparsable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.otp_length, 6);
        assert_eq!(config.otp_expires, 5);
        assert_eq!(config.max_entries, 10_000);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 30);
        assert_eq!(config.delivery_queue, 256);
        assert_eq!(config.otp(), OtpConfig::default());
    }

    #[test]
    fn test_env_or_fallbacks() {
        env::remove_var("MINI_OTP_TEST_UNSET");
        assert_eq!(env_or("MINI_OTP_TEST_UNSET", 7usize), 7);

        env::set_var("MINI_OTP_TEST_GARBAGE", "seven");
        assert_eq!(env_or("MINI_OTP_TEST_GARBAGE", 7usize), 7);

        env::set_var("MINI_OTP_TEST_SET", " 8 ");
        assert_eq!(env_or("MINI_OTP_TEST_SET", 7usize), 8);
    }
}
