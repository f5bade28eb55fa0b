//! Item handlers
//!
//! Plain record-store operations. Status never changes here: the claim
//! routes in [`super::claims`] and [`super::admin`] own every transition.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::{info, instrument};
use validator::Validate;

use core_kernel::ItemId;
use domain_items::{Comment, Item};
use domain_users::Actor;

use crate::dto::items::*;
use crate::{AppState, error::ApiError};

/// Reports a new item; the requester becomes its reporter
#[instrument(skip(state, request), fields(user = %actor.id))]
pub async fn create_item(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    request.validate()?;
    let item = Item::report(request.into(), Some(actor.id))?;
    state.ports.items.create_item(&item).await?;
    info!(item = %item.id, "Item reported");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Lists all items, newest first
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    Ok(Json(state.ports.items.list_items().await?))
}

/// Gets an item by ID
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> Result<Json<Item>, ApiError> {
    Ok(Json(state.ports.items.get_item(id).await?))
}

/// Edits the descriptive fields of an item
#[instrument(skip(state, request), fields(item = %id, user = %actor.id))]
pub async fn update_item(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<ItemId>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<Item>, ApiError> {
    let mut item = state.ports.items.get_item(id).await?;
    ensure_can_manage(&item, &actor)?;
    request.validate()?;

    item.apply_details(request.into())?;
    state.ports.items.update_details(&item).await?;
    Ok(Json(item))
}

/// Deletes an item and its comments
#[instrument(skip(state), fields(item = %id, user = %actor.id))]
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<ItemId>,
) -> Result<Json<MessageResponse>, ApiError> {
    let item = state.ports.items.get_item(id).await?;
    ensure_can_manage(&item, &actor)?;

    state.ports.items.delete_item(id).await?;
    info!("Item removed");
    Ok(Json(MessageResponse::new("Item removed")))
}

/// Appends a comment and returns the whole thread
#[instrument(skip(state, request), fields(item = %id, user = %actor.id))]
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<ItemId>,
    Json(request): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<Vec<Comment>>), ApiError> {
    request.validate()?;
    let mut item = state.ports.items.get_item(id).await?;

    let comment = item.add_comment(actor.id, &request.text)?;
    state.ports.items.add_comment(id, &comment).await?;
    Ok((StatusCode::CREATED, Json(item.comments)))
}

/// Only the reporter or an admin may edit or delete an item
fn ensure_can_manage(item: &Item, actor: &Actor) -> Result<(), ApiError> {
    if actor.is_admin() || item.is_reported_by(actor.id) {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Not authorized".to_string()))
    }
}
