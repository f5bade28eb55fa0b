//! Notification inbox handlers

use axum::{extract::{Path, State}, Extension, Json};

use core_kernel::NotificationId;
use domain_claims::Notification;
use domain_users::Actor;

use crate::{AppState, error::ApiError};

/// The requester's notifications, newest first
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    Ok(Json(state.inbox.list(&actor).await?))
}

/// Marks one of the requester's notifications as read
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<NotificationId>,
) -> Result<Json<Notification>, ApiError> {
    Ok(Json(state.inbox.mark_read(&actor, id).await?))
}
