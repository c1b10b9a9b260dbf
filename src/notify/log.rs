//! Logging notifier.
//!
//! Writes a delivery line through `tracing` instead of sending anything.
//! Useful for development and as the default sink of the server binary.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::notify::{mask_recipient, Notifier, OtpMessage};

#[derive(Debug, Clone, Default)]
pub struct LogNotifier {
    delivered: Arc<AtomicU64>,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages delivered so far.
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, message: &OtpMessage) -> Result<()> {
        // The code itself is never written to the log
        info!(
            recipient = %mask_recipient(&message.recipient),
            subject = message.subject(),
            expires_at = %message.expires_at,
            "OTP message delivered"
        );
        self.delivered.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn channel(&self) -> &str {
        "log"
    }
}
