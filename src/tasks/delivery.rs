//! Delivery Worker
//!
//! Drains the notification queue into the real channel in the background.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::notify::{mask_recipient, Notifier, OtpMessage, QueuedNotifier};

/// Creates a bounded delivery queue of `capacity` and a worker that feeds
/// every queued message to `inner`.
///
/// Delivery failures are logged and dropped; nobody upstream waits on them.
/// The worker exits once every [`QueuedNotifier`] clone has been dropped.
pub fn spawn_delivery_worker(
    inner: Arc<dyn Notifier>,
    capacity: usize,
) -> (QueuedNotifier, JoinHandle<()>) {
    let (sender, mut receiver) = mpsc::channel::<OtpMessage>(capacity.max(1));

    let handle = tokio::spawn(async move {
        info!(
            "Starting delivery worker on '{}' channel (queue capacity {})",
            inner.channel(),
            capacity.max(1)
        );

        while let Some(message) = receiver.recv().await {
            if let Err(err) = inner.deliver(&message).await {
                warn!(
                    "Delivery to {} via '{}' failed: {}",
                    mask_recipient(&message.recipient),
                    inner.channel(),
                    err
                );
            }
        }

        info!("Delivery queue closed, worker stopping");
    });

    (QueuedNotifier::new(sender), handle)
}
