//! TTL Cleanup Task
//!
//! Background task that periodically sweeps OTP records whose backend TTL
//! has elapsed.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryCache;

/// Spawns a task that calls [`MemoryCache::purge_expired`] every
/// `cleanup_interval_secs` seconds.
///
/// Reads already ignore expired entries; the sweep only bounds memory held
/// by records nobody asks about again. Abort the returned handle on shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(MemoryCache::new(10_000, Arc::new(SystemClock)));
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 30);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: Arc<MemoryCache>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired().await;
            let remaining = cache.len().await;
            if removed > 0 {
                info!(
                    "TTL cleanup: removed {} expired OTP records, {} remain",
                    removed, remaining
                );
            } else {
                debug!("TTL cleanup: no expired OTP records found ({} live)", remaining);
            }
        }
    })
}
