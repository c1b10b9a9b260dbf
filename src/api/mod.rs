//! API Module
//!
//! HTTP handlers and routing for the OTP server REST API.
//!
//! # Endpoints
//! - `POST /otp` - Issue a code
//! - `POST /otp/validate` - Validate a code
//! - `GET /otp/:identifier` - Inspect the current code's expiry
//! - `DELETE /otp/:identifier` - Drop the current code
//! - `GET /stats` - Backend statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
