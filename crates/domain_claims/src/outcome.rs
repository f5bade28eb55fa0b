//! Explicit results of the best-effort side effects
//!
//! A claim transition succeeds once the item write commits. Notification,
//! history and audit writes that follow may fail; each attempt is reported
//! here instead of being dropped, so callers and tests can see exactly what
//! was delivered.

use serde::Serialize;

use core_kernel::{ClaimLogId, NotificationId, UserId};
use domain_items::{Item, ItemEvent};

/// Result of one notification write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum DeliveryOutcome {
    Delivered(NotificationId),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAttempt {
    pub recipient: UserId,
    pub outcome: DeliveryOutcome,
}

impl DeliveryAttempt {
    pub fn is_delivered(&self) -> bool {
        matches!(self.outcome, DeliveryOutcome::Delivered(_))
    }
}

/// A committed claim transition and its side effects
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    /// The item as committed
    pub item: Item,
    pub event: ItemEvent,
    pub deliveries: Vec<DeliveryAttempt>,
    /// Whether a closed claim was written to the history archive
    pub archived: bool,
}

impl TransitionOutcome {
    /// Number of notifications delivered to `recipient`
    pub fn delivered_to(&self, recipient: UserId) -> usize {
        self.deliveries
            .iter()
            .filter(|d| d.recipient == recipient && d.is_delivered())
            .count()
    }

    pub fn failed_deliveries(&self) -> impl Iterator<Item = &DeliveryAttempt> {
        self.deliveries.iter().filter(|d| !d.is_delivered())
    }
}

/// Result of the audit log write that follows an admin review
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum AuditOutcome {
    Recorded(ClaimLogId),
    Failed(String),
}

impl AuditOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, AuditOutcome::Recorded(_))
    }
}

/// A committed admin review
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub transition: TransitionOutcome,
    pub audit: AuditOutcome,
}
