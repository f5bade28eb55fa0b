//! Audit Log of admin claim decisions
//!
//! Entries snapshot the item title and the display names involved, so the
//! log stays readable after items or users are deleted.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimLogId, DomainPort, HealthCheckable, ItemId, PortError, UserId};

/// An admin's verdict on a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    /// Parses the action segment of `/admin/claims/:id/:action`
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "approve" => Some(ReviewDecision::Approve),
            "reject" => Some(ReviewDecision::Reject),
            _ => None,
        }
    }

    /// The audit action recorded for this decision
    pub fn action(&self) -> ClaimAction {
        match self {
            ReviewDecision::Approve => ClaimAction::Approved,
            ReviewDecision::Reject => ClaimAction::Rejected,
        }
    }
}

/// Recorded outcome of a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimAction {
    Approved,
    Rejected,
}

impl ClaimAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimAction::Approved => "approved",
            ClaimAction::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ClaimAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClaimAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(ClaimAction::Approved),
            "rejected" => Ok(ClaimAction::Rejected),
            other => Err(format!("Unknown claim action: {}", other)),
        }
    }
}

/// Immutable record of one admin decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimLog {
    pub id: ClaimLogId,
    pub item_id: ItemId,
    pub item_title: String,
    pub claimant_id: UserId,
    pub claimant_name: String,
    pub admin_id: UserId,
    pub admin_name: String,
    pub action: ClaimAction,
    pub timestamp: DateTime<Utc>,
}

/// Append-only audit store
#[async_trait]
pub trait ClaimLogPort: DomainPort + HealthCheckable {
    /// Appends an entry
    async fn record(&self, entry: &ClaimLog) -> Result<(), PortError>;

    /// The most recent entries, newest first, at most `limit`
    async fn list_recent(&self, limit: usize) -> Result<Vec<ClaimLog>, PortError>;
}

/// Mock implementation of ClaimLogPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;
    use core_kernel::HealthCheckResult;

    #[derive(Debug, Default)]
    pub struct MockClaimLogPort {
        entries: Arc<RwLock<Vec<ClaimLog>>>,
        fail_writes: AtomicBool,
    }

    impl MockClaimLogPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        /// Every entry in insertion order
        pub async fn entries(&self) -> Vec<ClaimLog> {
            self.entries.read().await.clone()
        }
    }

    impl DomainPort for MockClaimLogPort {}

    #[async_trait]
    impl HealthCheckable for MockClaimLogPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-claim-log-port")
        }
    }

    #[async_trait]
    impl ClaimLogPort for MockClaimLogPort {
        async fn record(&self, entry: &ClaimLog) -> Result<(), PortError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(PortError::connection("audit store unavailable"));
            }
            self.entries.write().await.push(entry.clone());
            Ok(())
        }

        async fn list_recent(&self, limit: usize) -> Result<Vec<ClaimLog>, PortError> {
            let mut entries = self.entries.read().await.clone();
            entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
            entries.truncate(limit);
            Ok(entries)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_from_action() {
        assert_eq!(ReviewDecision::from_action("approve"), Some(ReviewDecision::Approve));
        assert_eq!(ReviewDecision::from_action("reject"), Some(ReviewDecision::Reject));
        assert_eq!(ReviewDecision::from_action("Approve"), None);
        assert_eq!(ReviewDecision::Reject.action(), ClaimAction::Rejected);
    }

    #[test]
    fn test_action_round_trips_through_str() {
        for action in [ClaimAction::Approved, ClaimAction::Rejected] {
            assert_eq!(action.as_str().parse::<ClaimAction>(), Ok(action));
        }
    }
}
