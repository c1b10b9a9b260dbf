//! Notification Module
//!
//! The delivery seam. The OTP core only produces a code and an expiry;
//! a [`Notifier`] takes it from there and the core never inspects whether
//! delivery succeeded.

mod log;
mod message;
mod queue;

use async_trait::async_trait;

use crate::error::Result;

pub use log::LogNotifier;
pub use message::{OtpMessage, OTP_SUBJECT};
pub use queue::QueuedNotifier;

/// Sink that carries an [`OtpMessage`] to its recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Hands `message` to the channel.
    async fn deliver(&self, message: &OtpMessage) -> Result<()>;

    /// Short channel name for logs.
    fn channel(&self) -> &str;
}

/// Masks all but the last 4 characters, e.g. `+15551234567` -> `********4567`.
pub fn mask_recipient(recipient: &str) -> String {
    let chars: Vec<char> = recipient.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let hidden = chars.len() - 4;
    let mut masked = "*".repeat(hidden);
    masked.extend(&chars[hidden..]);
    masked
}
