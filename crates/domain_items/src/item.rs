//! Item aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CoreError, ItemId, UserId};

use crate::comment::Comment;
use crate::error::ItemError;
use crate::events::ItemEvent;

/// Whether the item was lost or found by its reporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Lost,
    Found,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Lost => "lost",
            ItemType::Found => "found",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lost" => Ok(ItemType::Lost),
            "found" => Ok(ItemType::Found),
            other => Err(CoreError::validation(format!("Unknown item type: {}", other))),
        }
    }
}

/// Item status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Open for claims
    Pending,
    /// A claim is awaiting admin review
    Claimed,
    /// Claim approved, handover arranged
    Resolved,
    /// Reserved terminal status; no transition produces it
    Rejected,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Claimed => "claimed",
            ItemStatus::Resolved => "resolved",
            ItemStatus::Rejected => "rejected",
        }
    }

    /// Checks whether the claim workflow can leave this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, ItemStatus::Resolved | ItemStatus::Rejected)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ItemStatus::Pending),
            "claimed" => Ok(ItemStatus::Claimed),
            "resolved" => Ok(ItemStatus::Resolved),
            "rejected" => Ok(ItemStatus::Rejected),
            other => Err(CoreError::validation(format!("Unknown item status: {}", other))),
        }
    }
}

/// Free-text details a claimant submits with a claim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDetails {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact_info: String,
    #[serde(default)]
    pub proof_details: String,
}

/// The single-slot claim embedded in an item
///
/// The claimant lives inside the claim so the two can never disagree: there
/// is no way to hold a claimant without claim details or vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveClaim {
    pub claimant: UserId,
    #[serde(flatten)]
    pub details: ClaimDetails,
    pub claimed_at: DateTime<Utc>,
}

/// Data needed to report a new item
#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub item_type: ItemType,
    pub category: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub image_url: Option<String>,
    pub contact_method: Option<String>,
    pub is_high_value: bool,
    pub is_anonymous: bool,
}

/// Descriptive fields that may be edited after reporting
///
/// Status and claim fields are deliberately absent: they change only through
/// the claim transitions.
#[derive(Debug, Clone, Default)]
pub struct ItemDetailsUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// Stored state a conditional write must still find before it applies
///
/// Adapters translate this into `... WHERE status = $n [AND claimed_by = $m]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionGuard {
    pub status: ItemStatus,
    pub claimant: Option<UserId>,
}

/// A reported lost or found item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub category: String,
    pub location: String,
    /// When the item was lost or found
    pub date: DateTime<Utc>,
    pub status: ItemStatus,
    pub image_url: Option<String>,
    /// `None` for anonymous reports
    pub reporter: Option<UserId>,
    pub contact_method: Option<String>,
    pub is_high_value: bool,
    pub is_anonymous: bool,
    pub claim: Option<ActiveClaim>,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Creates a new pending item
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when a required text field is blank
    pub fn report(new: NewItem, reporter: Option<UserId>) -> Result<Self, CoreError> {
        CoreError::require_non_blank("title", &new.title)?;
        CoreError::require_non_blank("description", &new.description)?;
        CoreError::require_non_blank("category", &new.category)?;
        CoreError::require_non_blank("location", &new.location)?;

        Ok(Self {
            id: ItemId::new_v7(),
            title: new.title.trim().to_string(),
            description: new.description,
            item_type: new.item_type,
            category: new.category,
            location: new.location,
            date: new.date,
            status: ItemStatus::Pending,
            image_url: new.image_url,
            reporter,
            contact_method: new.contact_method,
            is_high_value: new.is_high_value,
            is_anonymous: new.is_anonymous,
            claim: None,
            comments: Vec::new(),
            created_at: Utc::now(),
        })
    }

    /// The current claimant, if a claim is held
    pub fn claimant(&self) -> Option<UserId> {
        self.claim.as_ref().map(|c| c.claimant)
    }

    pub fn is_reported_by(&self, user: UserId) -> bool {
        self.reporter == Some(user)
    }

    /// Snapshot of the fields a conditional write must re-check
    pub fn guard(&self) -> TransitionGuard {
        TransitionGuard {
            status: self.status,
            claimant: self.claimant(),
        }
    }

    /// Checks the claim-slot invariant for the current status
    ///
    /// Pending and rejected items hold no claim; claimed items always hold
    /// one. Resolved items keep the approved claim for history.
    pub fn claim_invariant_holds(&self) -> bool {
        match self.status {
            ItemStatus::Pending | ItemStatus::Rejected => self.claim.is_none(),
            ItemStatus::Claimed => self.claim.is_some(),
            ItemStatus::Resolved => true,
        }
    }

    /// Opens a claim on a pending item
    ///
    /// # Errors
    ///
    /// - `NotClaimable` if the item is not pending
    /// - `OwnItem` if the claimant reported the item
    pub fn submit_claim(
        &mut self,
        claimant: UserId,
        details: ClaimDetails,
        at: DateTime<Utc>,
    ) -> Result<ItemEvent, ItemError> {
        if self.status != ItemStatus::Pending {
            return Err(ItemError::NotClaimable { status: self.status });
        }
        if self.is_reported_by(claimant) {
            return Err(ItemError::OwnItem);
        }

        self.status = ItemStatus::Claimed;
        self.claim = Some(ActiveClaim {
            claimant,
            details,
            claimed_at: at,
        });

        Ok(ItemEvent::ClaimSubmitted {
            item_id: self.id,
            claimant,
            reporter: self.reporter,
            timestamp: at,
        })
    }

    /// Withdraws the requester's own claim, reopening the item
    ///
    /// # Errors
    ///
    /// - `NotClaimed` if the item holds no claim
    /// - `NotClaimant` if someone other than the claimant asks
    pub fn cancel_claim(&mut self, requester: UserId) -> Result<ItemEvent, ItemError> {
        let claim = self.held_claim().ok_or(ItemError::NotClaimed { status: self.status })?;
        if claim.claimant != requester {
            return Err(ItemError::NotClaimant);
        }

        self.reopen();
        Ok(ItemEvent::ClaimCancelled {
            item_id: self.id,
            reporter: self.reporter,
            claim,
            timestamp: Utc::now(),
        })
    }

    /// Approves the pending claim; the claim stays on the item
    ///
    /// # Errors
    ///
    /// - `PickupLocationRequired` if the pickup location is blank
    /// - `NotUnderReview` if the item holds no claim
    pub fn approve_claim(&mut self, pickup_location: &str) -> Result<ItemEvent, ItemError> {
        let pickup_location = pickup_location.trim();
        if pickup_location.is_empty() {
            return Err(ItemError::PickupLocationRequired);
        }
        let claim = self
            .held_claim()
            .ok_or(ItemError::NotUnderReview { status: self.status })?;

        self.status = ItemStatus::Resolved;
        Ok(ItemEvent::ClaimApproved {
            item_id: self.id,
            reporter: self.reporter,
            claim,
            pickup_location: pickup_location.to_string(),
            timestamp: Utc::now(),
        })
    }

    /// Rejects the pending claim, reopening the item
    ///
    /// # Errors
    ///
    /// Returns `NotUnderReview` if the item holds no claim
    pub fn reject_claim(&mut self) -> Result<ItemEvent, ItemError> {
        let claim = self
            .held_claim()
            .ok_or(ItemError::NotUnderReview { status: self.status })?;

        self.reopen();
        Ok(ItemEvent::ClaimRejected {
            item_id: self.id,
            reporter: self.reporter,
            claim,
            timestamp: Utc::now(),
        })
    }

    /// Applies descriptive edits
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if a provided field is blank
    pub fn apply_details(&mut self, update: ItemDetailsUpdate) -> Result<(), CoreError> {
        for (field, value) in [
            ("title", &update.title),
            ("description", &update.description),
            ("category", &update.category),
            ("location", &update.location),
        ] {
            if let Some(value) = value {
                CoreError::require_non_blank(field, value)?;
            }
        }

        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        Ok(())
    }

    /// Appends a comment and returns it
    pub fn add_comment(&mut self, author: UserId, text: &str) -> Result<Comment, CoreError> {
        let comment = Comment::new(author, text)?;
        self.comments.push(comment.clone());
        Ok(comment)
    }

    /// The claim under review, if the item is in the claimed state
    fn held_claim(&self) -> Option<ActiveClaim> {
        match (self.status, &self.claim) {
            (ItemStatus::Claimed, Some(claim)) => Some(claim.clone()),
            _ => None,
        }
    }

    fn reopen(&mut self) {
        self.status = ItemStatus::Pending;
        self.claim = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_item(reporter: Option<UserId>) -> Item {
        Item::report(
            NewItem {
                title: "Black backpack".to_string(),
                description: "North Face, laptop sleeve".to_string(),
                item_type: ItemType::Found,
                category: "Bags".to_string(),
                location: "Library 2F".to_string(),
                date: Utc::now(),
                image_url: None,
                contact_method: None,
                is_high_value: false,
                is_anonymous: reporter.is_none(),
            },
            reporter,
        )
        .unwrap()
    }

    #[test]
    fn test_report_rejects_blank_title() {
        let mut new = NewItem {
            title: "  ".to_string(),
            description: "d".to_string(),
            item_type: ItemType::Lost,
            category: "c".to_string(),
            location: "l".to_string(),
            date: Utc::now(),
            image_url: None,
            contact_method: None,
            is_high_value: false,
            is_anonymous: false,
        };
        assert!(Item::report(new.clone(), None).is_err());
        new.title = "Keys".to_string();
        assert_eq!(Item::report(new, None).unwrap().status, ItemStatus::Pending);
    }

    #[test]
    fn test_failed_transition_leaves_item_untouched() {
        let reporter = UserId::new();
        let mut item = pending_item(Some(reporter));
        let before = item.clone();

        assert_eq!(
            item.submit_claim(reporter, ClaimDetails::default(), Utc::now()),
            Err(ItemError::OwnItem)
        );
        assert_eq!(item.cancel_claim(UserId::new()), Err(ItemError::NotClaimed { status: ItemStatus::Pending }));
        assert_eq!(item.approve_claim("Front Desk"), Err(ItemError::NotUnderReview { status: ItemStatus::Pending }));
        assert_eq!(item, before);
    }

    #[test]
    fn test_approve_keeps_claim() {
        let claimant = UserId::new();
        let mut item = pending_item(Some(UserId::new()));
        item.submit_claim(claimant, ClaimDetails::default(), Utc::now()).unwrap();
        item.approve_claim(" Front Desk ").unwrap();

        assert_eq!(item.status, ItemStatus::Resolved);
        assert_eq!(item.claimant(), Some(claimant));
        assert!(item.claim_invariant_holds());
    }

    #[test]
    fn test_guard_reflects_claimant() {
        let claimant = UserId::new();
        let mut item = pending_item(None);
        assert_eq!(item.guard(), TransitionGuard { status: ItemStatus::Pending, claimant: None });
        item.submit_claim(claimant, ClaimDetails::default(), Utc::now()).unwrap();
        assert_eq!(item.guard().claimant, Some(claimant));
    }
}
