//! Root and health check endpoints.
//!
//! These endpoints are used by load balancers and monitoring systems
//! to verify service health.

use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use ticketmaster_core::KeyValueStore;

/// Root greeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootResponse {
    /// Always `"Hello World"`
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}

/// Readiness check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,
    /// Store answered a ping
    pub store: bool,
}

/// Root endpoint.
///
/// ```text
/// GET /
/// {"message":"Hello World"}
/// ```
#[allow(clippy::unused_async)]
pub async fn root() -> Json<RootResponse> {
    tracing::info!("Root endpoint was called");
    Json(RootResponse {
        message: "Hello World".to_string(),
    })
}

/// Liveness check.
///
/// Returns 200 OK if the service is running. Does NOT check the store.
///
/// ```bash
/// curl http://localhost:8000/health
/// # {"status":"ok","version":"0.1.0"}
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Readiness check.
///
/// Pings the store. Returns 200 when it answers, 503 otherwise.
///
/// ```bash
/// curl http://localhost:8000/ready
/// # {"ready":true,"store":true}
/// ```
pub async fn readiness_check<S: KeyValueStore + 'static>(
    State(state): State<AppState<S>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let store = match state.tickets.store().ping().await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Readiness check failed: store did not answer");
            false
        }
    };

    let status = if store {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(ReadinessResponse { ready: store, store }))
}
