//! API Handlers
//!
//! HTTP request handlers for each OTP server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::MemoryCache;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{OtpError, Result};
use crate::models::{
    ClearResponse, GenerateRequest, GenerateResponse, HealthResponse, StatsResponse,
    StatusResponse, ValidateRequest, ValidateResponse,
};
use crate::notify::{Notifier, OtpMessage};
use crate::otp::{OtpEngine, OtpStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<OtpEngine>,
    /// Backend behind the engine, kept for stats and the cleanup task
    pub cache: Arc<MemoryCache>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(engine: Arc<OtpEngine>, cache: Arc<MemoryCache>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            engine,
            cache,
            notifier,
        }
    }

    /// Wires a wall-clock engine over a fresh [`MemoryCache`] sized from `config`.
    pub fn from_config(config: &Config, notifier: Arc<dyn Notifier>) -> Result<Self> {
        Self::with_clock(config, notifier, Arc::new(SystemClock))
    }

    /// Same as [`AppState::from_config`] with an explicit clock.
    pub fn with_clock(
        config: &Config,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let cache = Arc::new(MemoryCache::new(config.max_entries, clock.clone()));
        let engine = OtpEngine::new(OtpStore::new(cache.clone()), clock, config.otp())?;
        Ok(Self::new(Arc::new(engine), cache, notifier))
    }
}

/// Handler for POST /otp
///
/// Issues a code and hands it to the notifier; the response carries only the expiry.
pub async fn generate_handler(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(OtpError::InvalidRequest(error_msg));
    }

    let config = req.otp_config(state.engine.config());
    let record = state.engine.generate_with(&req.identifier, &config).await?;

    let mut message = OtpMessage::new(req.recipient(), &record);
    if let Some(custom) = &req.message {
        message = message.with_custom_message(custom.clone());
    }
    state.notifier.deliver(&message).await?;

    Ok(Json(GenerateResponse::new(req.identifier, record.expires_at)))
}

/// Handler for POST /otp/validate
///
/// Every domain outcome is a 200; callers branch on `status` / `message`.
pub async fn validate_handler(
    State(state): State<AppState>,
    Json(req): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(OtpError::InvalidRequest(error_msg));
    }

    let result = state.engine.validate(&req.identifier, &req.code).await?;
    Ok(Json(result.into()))
}

/// Handler for GET /otp/:identifier
pub async fn status_handler(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<StatusResponse>> {
    let expires_at = match state.engine.get_expires(&identifier).await {
        Ok(at) => Some(at),
        Err(OtpError::NotFound(_)) => None,
        Err(err) => return Err(err),
    };
    let expired = state.engine.is_expired(&identifier).await?;

    Ok(Json(StatusResponse {
        identifier,
        exists: expires_at.is_some(),
        expired,
        expires_at,
    }))
}

/// Handler for DELETE /otp/:identifier
pub async fn clear_handler(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<ClearResponse>> {
    state.engine.clear(&identifier).await?;
    Ok(Json(ClearResponse::new(identifier)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::notify::LogNotifier;
    use chrono::Duration;

    fn state() -> (AppState, LogNotifier, Arc<ManualClock>) {
        let notifier = LogNotifier::new();
        let clock = Arc::new(ManualClock::starting_now());
        let state =
            AppState::with_clock(&Config::default(), Arc::new(notifier.clone()), clock.clone())
                .unwrap();
        (state, notifier, clock)
    }

    fn generate_req(identifier: &str) -> GenerateRequest {
        GenerateRequest {
            identifier: identifier.to_string(),
            recipient: None,
            length: None,
            expires: None,
            message: None,
        }
    }

    #[tokio::test]
    async fn test_generate_notifies_and_stores() {
        let (state, notifier, clock) = state();

        let response = generate_handler(State(state.clone()), Json(generate_req("user-1")))
            .await
            .unwrap();

        assert_eq!(response.expires_at, clock.now() + Duration::minutes(5));
        assert_eq!(notifier.delivered(), 1);
        assert!(state.engine.has("user-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_generate_rejects_blank_identifier() {
        let (state, notifier, _) = state();

        let result = generate_handler(State(state), Json(generate_req(" "))).await;

        assert!(matches!(result, Err(OtpError::InvalidRequest(_))));
        assert_eq!(notifier.delivered(), 0);
    }

    #[tokio::test]
    async fn test_generate_rejects_bad_override() {
        let (state, _, _) = state();
        let mut req = generate_req("user-1");
        req.length = Some(0);

        let result = generate_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(OtpError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_validate_flow() {
        let (state, _, _) = state();
        let record = state.engine.generate("user-1").await.unwrap();

        let req = ValidateRequest {
            identifier: "user-1".to_string(),
            code: record.code.clone(),
        };
        let response = validate_handler(State(state.clone()), Json(req.clone()))
            .await
            .unwrap();
        assert!(response.status);
        assert_eq!(response.message, "otp.valid");

        let response = validate_handler(State(state), Json(req)).await.unwrap();
        assert!(!response.status);
        assert_eq!(response.message, "otp.empty");
    }

    #[tokio::test]
    async fn test_status_handler() {
        let (state, _, clock) = state();

        let response = status_handler(State(state.clone()), Path("user-1".to_string()))
            .await
            .unwrap();
        assert!(!response.exists);
        assert!(response.expires_at.is_none());

        let record = state.engine.generate("user-1").await.unwrap();
        clock.advance(Duration::minutes(6));

        let response = status_handler(State(state), Path("user-1".to_string()))
            .await
            .unwrap();
        assert!(response.exists);
        assert!(response.expired);
        assert_eq!(response.expires_at, Some(record.expires_at));
    }

    #[tokio::test]
    async fn test_clear_handler() {
        let (state, _, _) = state();
        state.engine.generate("user-1").await.unwrap();

        clear_handler(State(state.clone()), Path("user-1".to_string()))
            .await
            .unwrap();
        assert!(!state.engine.has("user-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
