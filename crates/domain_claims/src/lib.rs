//! Claim Lifecycle Domain
//!
//! This crate drives the claim workflow on top of the item aggregate: it
//! commits each transition with a conditional write, then fans out the side
//! effects (notifications, claim history, audit log) as best-effort writes.
//!
//! # Flow
//!
//! ```text
//! request -> ClaimLifecycleService -> ItemPort::apply_transition
//!                                  -> ClaimHistoryPort (closed claims)
//!                                  -> NotificationPort (per recipient)
//!         -> AdminReviewService    -> ClaimLogPort (admin decisions)
//! ```

pub mod error;
pub mod notification;
pub mod audit;
pub mod history;
pub mod rules;
pub mod outcome;
pub mod summary;
pub mod engine;
pub mod review;

pub use error::ClaimError;
pub use notification::{Notification, NotificationPort, NotificationInbox};
pub use audit::{ClaimLog, ClaimLogPort, ClaimAction, ReviewDecision};
pub use history::{ClaimRecord, ClaimOutcome, ClaimHistoryPort};
pub use outcome::{DeliveryAttempt, DeliveryOutcome, TransitionOutcome, AuditOutcome, ReviewOutcome};
pub use summary::{HighValueItemSummary, PendingClaimSummary};
pub use engine::ClaimLifecycleService;
pub use review::{AdminReviewService, DEFAULT_CLAIM_LOG_LIMIT};

#[cfg(any(test, feature = "mock"))]
pub use notification::mock::MockNotificationPort;
#[cfg(any(test, feature = "mock"))]
pub use audit::mock::MockClaimLogPort;
#[cfg(any(test, feature = "mock"))]
pub use history::mock::MockClaimHistoryPort;
