//! Request and Response models for the OTP server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{GenerateRequest, ValidateRequest};
pub use responses::{
    ClearResponse, GenerateResponse, HealthResponse, StatsResponse, StatusResponse,
    ValidateResponse,
};
