//! Claim history archive
//!
//! An item holds one claim at a time and a new claim overwrites the slot.
//! Each closed claim is copied here first so earlier attempts stay visible.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimRecordId, DomainPort, HealthCheckable, ItemId, PortError, UserId};
use domain_items::{ActiveClaim, ClaimDetails, ItemEvent};

/// How a claim left the active slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimOutcome {
    Cancelled,
    Rejected,
    Approved,
}

impl ClaimOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimOutcome::Cancelled => "cancelled",
            ClaimOutcome::Rejected => "rejected",
            ClaimOutcome::Approved => "approved",
        }
    }
}

impl fmt::Display for ClaimOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClaimOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cancelled" => Ok(ClaimOutcome::Cancelled),
            "rejected" => Ok(ClaimOutcome::Rejected),
            "approved" => Ok(ClaimOutcome::Approved),
            other => Err(format!("Unknown claim outcome: {}", other)),
        }
    }
}

/// A closed claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    pub id: ClaimRecordId,
    pub item_id: ItemId,
    pub claimant: UserId,
    #[serde(flatten)]
    pub details: ClaimDetails,
    pub claimed_at: DateTime<Utc>,
    pub outcome: ClaimOutcome,
    pub closed_at: DateTime<Utc>,
}

impl ClaimRecord {
    pub fn close(item_id: ItemId, claim: &ActiveClaim, outcome: ClaimOutcome, closed_at: DateTime<Utc>) -> Self {
        Self {
            id: ClaimRecordId::new_v7(),
            item_id,
            claimant: claim.claimant,
            details: claim.details.clone(),
            claimed_at: claim.claimed_at,
            outcome,
            closed_at,
        }
    }

    /// The record for a transition that closed a claim; `None` for submissions
    pub fn from_event(event: &ItemEvent) -> Option<Self> {
        let outcome = match event {
            ItemEvent::ClaimSubmitted { .. } => return None,
            ItemEvent::ClaimCancelled { .. } => ClaimOutcome::Cancelled,
            ItemEvent::ClaimApproved { .. } => ClaimOutcome::Approved,
            ItemEvent::ClaimRejected { .. } => ClaimOutcome::Rejected,
        };
        event
            .closed_claim()
            .map(|claim| Self::close(event.item_id(), claim, outcome, event.timestamp()))
    }
}

/// Append-only store of closed claims
#[async_trait]
pub trait ClaimHistoryPort: DomainPort + HealthCheckable {
    async fn append(&self, record: &ClaimRecord) -> Result<(), PortError>;

    /// An item's closed claims, oldest first
    async fn list_for_item(&self, item_id: ItemId) -> Result<Vec<ClaimRecord>, PortError>;
}

/// Mock implementation of ClaimHistoryPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;
    use core_kernel::HealthCheckResult;

    #[derive(Debug, Default)]
    pub struct MockClaimHistoryPort {
        records: Arc<RwLock<Vec<ClaimRecord>>>,
        fail_writes: AtomicBool,
    }

    impl MockClaimHistoryPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }
    }

    impl DomainPort for MockClaimHistoryPort {}

    #[async_trait]
    impl HealthCheckable for MockClaimHistoryPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-claim-history-port")
        }
    }

    #[async_trait]
    impl ClaimHistoryPort for MockClaimHistoryPort {
        async fn append(&self, record: &ClaimRecord) -> Result<(), PortError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(PortError::connection("history store unavailable"));
            }
            self.records.write().await.push(record.clone());
            Ok(())
        }

        async fn list_for_item(&self, item_id: ItemId) -> Result<Vec<ClaimRecord>, PortError> {
            let mut records: Vec<_> = self
                .records
                .read()
                .await
                .iter()
                .filter(|r| r.item_id == item_id)
                .cloned()
                .collect();
            records.sort_by_key(|r| (r.closed_at, r.id));
            Ok(records)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_is_not_archived() {
        let event = ItemEvent::ClaimSubmitted {
            item_id: ItemId::new(),
            claimant: UserId::new(),
            reporter: None,
            timestamp: Utc::now(),
        };
        assert!(ClaimRecord::from_event(&event).is_none());
    }

    #[test]
    fn test_rejection_archives_claim_details() {
        let claim = ActiveClaim {
            claimant: UserId::new(),
            details: ClaimDetails {
                description: "mine".to_string(),
                ..Default::default()
            },
            claimed_at: Utc::now(),
        };
        let event = ItemEvent::ClaimRejected {
            item_id: ItemId::new(),
            reporter: None,
            claim: claim.clone(),
            timestamp: Utc::now(),
        };

        let record = ClaimRecord::from_event(&event).unwrap();
        assert_eq!(record.outcome, ClaimOutcome::Rejected);
        assert_eq!(record.claimant, claim.claimant);
        assert_eq!(record.details.description, "mine");
    }
}
