//! Admin review handlers
//!
//! Role checks happen in [`domain_claims::AdminReviewService`], so a
//! non-admin gets the same `403 Not authorized` from every route here.

use axum::{extract::{Path, State}, Extension, Json};

use core_kernel::ItemId;
use domain_claims::{ClaimLog, ClaimRecord, HighValueItemSummary, PendingClaimSummary};
use domain_items::Item;
use domain_users::Actor;

use crate::dto::claims::ReviewClaimRequest;
use crate::handlers::claims::log_failed_deliveries;
use crate::{AppState, error::ApiError};

/// Lists claimed items awaiting review
pub async fn list_pending_claims(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<PendingClaimSummary>>, ApiError> {
    Ok(Json(state.reviews.list_pending_claims(&actor).await?))
}

/// Approves or rejects a claim
///
/// `action` is `approve` or `reject`; approvals need `pickupLocation`.
pub async fn review_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((id, action)): Path<(ItemId, String)>,
    request: Option<Json<ReviewClaimRequest>>,
) -> Result<Json<Item>, ApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let outcome = state
        .reviews
        .review_claim(id, &actor, &action, request.pickup_location.as_deref())
        .await?;
    log_failed_deliveries(&outcome.transition);
    Ok(Json(outcome.transition.item))
}

/// High-value items, newest report first
pub async fn list_high_value_items(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<HighValueItemSummary>>, ApiError> {
    Ok(Json(state.reviews.list_high_value_items(&actor).await?))
}

/// Most recent admin decisions
pub async fn list_claim_logs(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<ClaimLog>>, ApiError> {
    Ok(Json(state.reviews.list_claim_logs(&actor).await?))
}

/// Every closed claim of an item, oldest first
pub async fn claim_history(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<ItemId>,
) -> Result<Json<Vec<ClaimRecord>>, ApiError> {
    Ok(Json(state.reviews.claim_history(&actor, id).await?))
}
