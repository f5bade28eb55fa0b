//! Claim handlers

use axum::{extract::{Path, State}, Extension, Json};
use tracing::warn;

use core_kernel::ItemId;
use domain_claims::TransitionOutcome;
use domain_items::Item;
use domain_users::Actor;

use crate::dto::claims::*;
use crate::{AppState, error::ApiError};

/// Submits a claim on a pending item
pub async fn submit_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<ItemId>,
    Json(request): Json<SubmitClaimRequest>,
) -> Result<Json<Item>, ApiError> {
    let outcome = state.claims.submit_claim(id, &actor, request.into()).await?;
    log_failed_deliveries(&outcome);
    Ok(Json(outcome.item))
}

/// Cancels the requester's own claim
pub async fn cancel_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<ItemId>,
) -> Result<Json<CancelClaimResponse>, ApiError> {
    let outcome = state.claims.cancel_claim(id, &actor).await?;
    log_failed_deliveries(&outcome);
    Ok(Json(CancelClaimResponse {
        message: "Claim cancelled successfully".to_string(),
        item: outcome.item,
    }))
}

/// Surfaces undelivered notifications in the access log's request span
pub(crate) fn log_failed_deliveries(outcome: &TransitionOutcome) {
    let failed = outcome.failed_deliveries().count();
    if failed > 0 {
        warn!(
            item = %outcome.item.id,
            failed,
            delivered = outcome.deliveries.len() - failed,
            "Claim transition committed with undelivered notifications"
        );
    }
}
