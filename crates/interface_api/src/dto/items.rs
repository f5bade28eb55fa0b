//! Item DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_items::{ItemDetailsUpdate, ItemType, NewItem};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    pub date: DateTime<Utc>,
    pub contact_method: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub is_high_value: bool,
}

impl From<CreateItemRequest> for NewItem {
    fn from(req: CreateItemRequest) -> Self {
        NewItem {
            title: req.title,
            description: req.description,
            item_type: req.item_type,
            category: req.category,
            location: req.location,
            date: req.date,
            image_url: req.image_url,
            contact_method: req.contact_method,
            is_high_value: req.is_high_value,
            is_anonymous: req.is_anonymous,
        }
    }
}

/// Descriptive edits; status is deliberately absent
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl From<UpdateItemRequest> for ItemDetailsUpdate {
    fn from(req: UpdateItemRequest) -> Self {
        ItemDetailsUpdate {
            title: req.title,
            description: req.description,
            category: req.category,
            location: req.location,
            date: req.date,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddCommentRequest {
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
