//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use domain_users::Actor;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::AppState;

/// Authentication middleware
///
/// Validates the bearer token and stores the resulting [`Actor`] (and the raw
/// claims) in the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        warn!("Missing or invalid Authorization header");
        return Err(ApiError::Unauthorized);
    };

    let claims = crate::auth::validate_token(token, &state.config.jwt_secret).map_err(|e| {
        warn!("Token validation failed: {:?}", e);
        ApiError::Unauthorized
    })?;
    let actor = claims.actor().map_err(|e| {
        warn!("Token subject rejected: {:?}", e);
        ApiError::Unauthorized
    })?;

    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

/// Access log middleware
///
/// Logs method, path, requester, status and latency of every API request.
pub async fn access_log_middleware(
    State(_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user_id = request
        .extensions()
        .get::<Actor>()
        .map(|a| a.id.to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        user = %user_id,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
