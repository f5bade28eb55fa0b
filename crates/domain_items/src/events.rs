//! Domain events for the item aggregate
//!
//! Every successful claim transition returns exactly one event. The claim
//! workflow turns events into notifications and history records, so each
//! event carries everything those need without re-reading the item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ItemId, UserId};

use crate::item::ActiveClaim;

/// Events emitted by the Item aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEvent {
    /// A user opened a claim on a pending item
    ClaimSubmitted {
        item_id: ItemId,
        claimant: UserId,
        reporter: Option<UserId>,
        timestamp: DateTime<Utc>,
    },

    /// The claimant withdrew their claim
    ClaimCancelled {
        item_id: ItemId,
        reporter: Option<UserId>,
        claim: ActiveClaim,
        timestamp: DateTime<Utc>,
    },

    /// An admin approved the claim
    ClaimApproved {
        item_id: ItemId,
        reporter: Option<UserId>,
        claim: ActiveClaim,
        pickup_location: String,
        timestamp: DateTime<Utc>,
    },

    /// An admin rejected the claim
    ClaimRejected {
        item_id: ItemId,
        reporter: Option<UserId>,
        claim: ActiveClaim,
        timestamp: DateTime<Utc>,
    },
}

impl ItemEvent {
    /// Returns the item ID for this event
    pub fn item_id(&self) -> ItemId {
        match self {
            ItemEvent::ClaimSubmitted { item_id, .. }
            | ItemEvent::ClaimCancelled { item_id, .. }
            | ItemEvent::ClaimApproved { item_id, .. }
            | ItemEvent::ClaimRejected { item_id, .. } => *item_id,
        }
    }

    /// Returns the claimant involved in this event
    pub fn claimant(&self) -> UserId {
        match self {
            ItemEvent::ClaimSubmitted { claimant, .. } => *claimant,
            ItemEvent::ClaimCancelled { claim, .. }
            | ItemEvent::ClaimApproved { claim, .. }
            | ItemEvent::ClaimRejected { claim, .. } => claim.claimant,
        }
    }

    /// Returns the reporter of the item, if not anonymous
    pub fn reporter(&self) -> Option<UserId> {
        match self {
            ItemEvent::ClaimSubmitted { reporter, .. }
            | ItemEvent::ClaimCancelled { reporter, .. }
            | ItemEvent::ClaimApproved { reporter, .. }
            | ItemEvent::ClaimRejected { reporter, .. } => *reporter,
        }
    }

    /// The claim this event closed, if any
    pub fn closed_claim(&self) -> Option<&ActiveClaim> {
        match self {
            ItemEvent::ClaimSubmitted { .. } => None,
            ItemEvent::ClaimCancelled { claim, .. }
            | ItemEvent::ClaimApproved { claim, .. }
            | ItemEvent::ClaimRejected { claim, .. } => Some(claim),
        }
    }

    /// Returns the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ItemEvent::ClaimSubmitted { timestamp, .. }
            | ItemEvent::ClaimCancelled { timestamp, .. }
            | ItemEvent::ClaimApproved { timestamp, .. }
            | ItemEvent::ClaimRejected { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            ItemEvent::ClaimSubmitted { .. } => "ClaimSubmitted",
            ItemEvent::ClaimCancelled { .. } => "ClaimCancelled",
            ItemEvent::ClaimApproved { .. } => "ClaimApproved",
            ItemEvent::ClaimRejected { .. } => "ClaimRejected",
        }
    }
}
