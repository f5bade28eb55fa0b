//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

use core_kernel::HealthCheckResult;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<HealthCheckResult>,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Vec::new(),
    })
}

/// Readiness check (asks every port adapter)
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let ports = &state.ports;
    let checks = vec![
        ports.items.health_check().await,
        ports.users.health_check().await,
        ports.notifications.health_check().await,
        ports.claim_logs.health_check().await,
        ports.history.health_check().await,
    ];

    let ready = checks.iter().all(HealthCheckResult::is_healthy);
    let response = HealthResponse {
        status: if ready { "ready" } else { "unavailable" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    };

    if ready {
        Ok(Json(response))
    } else {
        warn!("Readiness check failed");
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
