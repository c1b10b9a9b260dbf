//! Background Tasks Module
//!
//! Tasks that run alongside the HTTP server.
//!
//! # Tasks
//! - TTL Cleanup: sweeps OTP records whose backend TTL elapsed
//! - Delivery: drains the notification queue into the configured channel

mod cleanup;
mod delivery;

pub use cleanup::spawn_cleanup_task;
pub use delivery::spawn_delivery_worker;
