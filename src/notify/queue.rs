//! Queued notifier.
//!
//! Front half of the asynchronous delivery channel: `deliver` only enqueues.
//! The back half is the worker started by
//! [`spawn_delivery_worker`](crate::tasks::spawn_delivery_worker).

use async_trait::async_trait;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::error::{OtpError, Result};
use crate::notify::{Notifier, OtpMessage};

#[derive(Debug, Clone)]
pub struct QueuedNotifier {
    sender: mpsc::Sender<OtpMessage>,
}

impl QueuedNotifier {
    pub fn new(sender: mpsc::Sender<OtpMessage>) -> Self {
        Self { sender }
    }

    /// Free slots left in the queue.
    pub fn remaining_capacity(&self) -> usize {
        self.sender.capacity()
    }
}

#[async_trait]
impl Notifier for QueuedNotifier {
    async fn deliver(&self, message: &OtpMessage) -> Result<()> {
        self.sender
            .try_send(message.clone())
            .map_err(|err| match err {
                TrySendError::Full(_) => OtpError::Delivery("delivery queue is full".to_string()),
                TrySendError::Closed(_) => {
                    OtpError::Delivery("delivery worker is not running".to_string())
                }
            })
    }

    fn channel(&self) -> &str {
        "queue"
    }
}
