//! Pending-claim summary shown on the admin review queue

use serde::{Deserialize, Serialize};

use core_kernel::ItemId;
use domain_items::{Item, ItemStatus, ItemType};
use domain_users::User;

/// One claimed item awaiting review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingClaimSummary {
    pub id: ItemId,
    pub item_id: ItemId,
    pub item_name: String,
    pub claimant_name: String,
    pub claimant_email: String,
    /// `YYYY-MM-DD` of the claim submission
    pub date_submitted: String,
    pub status: ItemStatus,
    pub description: String,
    pub contact_info: String,
    pub proof_details: String,
    pub item_type: ItemType,
}

impl PendingClaimSummary {
    /// Projects a claimed item; `None` if it holds no claim
    ///
    /// `claimant` is `None` when the claimant account no longer exists.
    pub fn project(item: &Item, claimant: Option<&User>) -> Option<Self> {
        let claim = item.claim.as_ref()?;
        Some(Self {
            id: item.id,
            item_id: item.id,
            item_name: item.title.clone(),
            claimant_name: claimant.map_or_else(|| "Anonymous".to_string(), |u| u.name.clone()),
            claimant_email: claimant.map_or_else(|| "N/A".to_string(), |u| u.email.clone()),
            date_submitted: claim.claimed_at.format("%Y-%m-%d").to_string(),
            status: item.status,
            description: claim.details.description.clone(),
            contact_info: claim.details.contact_info.clone(),
            proof_details: claim.details.proof_details.clone(),
            item_type: item.item_type,
        })
    }
}

/// One high-value item on the admin watch list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighValueItemSummary {
    pub id: ItemId,
    pub title: String,
    pub location: String,
    /// `YYYY-MM-DD` of the report
    pub date: String,
    pub status: ItemStatus,
    pub item_type: ItemType,
    pub is_high_value: bool,
}

impl HighValueItemSummary {
    /// Projects an item; `None` unless it is flagged high-value
    pub fn project(item: &Item) -> Option<Self> {
        item.is_high_value.then(|| Self {
            id: item.id,
            title: item.title.clone(),
            location: item.location.clone(),
            date: item.created_at.format("%Y-%m-%d").to_string(),
            status: item.status,
            item_type: item.item_type,
            is_high_value: true,
        })
    }
}
