//! Admin Review Surface
//!
//! Wraps the lifecycle engine's review transition with the audit log write,
//! and serves the admin read models: the pending-claim queue, the high-value
//! watch list, recent audit entries and per-item claim history.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, instrument, warn};

use core_kernel::{ClaimLogId, ItemId, UserId};
use domain_items::{ItemPort, ItemStatus};
use domain_users::{Actor, User, UserPort, UserPortExt};

use crate::audit::{ClaimLog, ClaimLogPort, ReviewDecision};
use crate::engine::ClaimLifecycleService;
use crate::error::ClaimError;
use crate::history::{ClaimHistoryPort, ClaimRecord};
use crate::outcome::{AuditOutcome, ReviewOutcome};
use crate::summary::{HighValueItemSummary, PendingClaimSummary};

/// Default number of audit entries returned by [`AdminReviewService::list_claim_logs`]
pub const DEFAULT_CLAIM_LOG_LIMIT: usize = 100;

pub struct AdminReviewService {
    engine: Arc<ClaimLifecycleService>,
    items: Arc<dyn ItemPort>,
    users: Arc<dyn UserPort>,
    claim_logs: Arc<dyn ClaimLogPort>,
    history: Arc<dyn ClaimHistoryPort>,
    claim_log_limit: usize,
}

impl AdminReviewService {
    pub fn new(
        engine: Arc<ClaimLifecycleService>,
        items: Arc<dyn ItemPort>,
        users: Arc<dyn UserPort>,
        claim_logs: Arc<dyn ClaimLogPort>,
        history: Arc<dyn ClaimHistoryPort>,
    ) -> Self {
        Self {
            engine,
            items,
            users,
            claim_logs,
            history,
            claim_log_limit: DEFAULT_CLAIM_LOG_LIMIT,
        }
    }

    /// Overrides how many audit entries are listed
    pub fn with_claim_log_limit(mut self, limit: usize) -> Self {
        self.claim_log_limit = limit;
        self
    }

    /// Reviews a claim and records the decision
    ///
    /// `action` is `approve` or `reject`. The audit write happens after the
    /// transition commits; its failure is reported in the outcome only.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the actor is not an admin
    /// - `InvalidArgument` for an unknown action or a missing pickup location
    /// - `NotFound` / `InvalidState` as for [`ClaimLifecycleService::admin_review`]
    #[instrument(skip(self), fields(item = %item_id, admin = %admin.id))]
    pub async fn review_claim(
        &self,
        item_id: ItemId,
        admin: &Actor,
        action: &str,
        pickup_location: Option<&str>,
    ) -> Result<ReviewOutcome, ClaimError> {
        ensure_admin(admin)?;
        let decision = ReviewDecision::from_action(action)
            .ok_or_else(|| ClaimError::invalid_argument("Invalid action"))?;

        let transition = self
            .engine
            .admin_review(item_id, admin, decision, pickup_location)
            .await?;

        let claimant_id = transition.event.claimant();
        let claimant = self.lookup(claimant_id).await;
        let reviewer = self.lookup(admin.id).await;

        let entry = ClaimLog {
            id: ClaimLogId::new_v7(),
            item_id,
            item_title: transition.item.title.clone(),
            claimant_id,
            claimant_name: claimant.map_or_else(|| "Anonymous".to_string(), |u| u.name),
            admin_id: admin.id,
            admin_name: reviewer.map_or_else(|| "Admin".to_string(), |u| u.name),
            action: decision.action(),
            timestamp: Utc::now(),
        };

        let audit = match self.claim_logs.record(&entry).await {
            Ok(()) => {
                info!(log = %entry.id, action = %entry.action, "Claim decision logged");
                AuditOutcome::Recorded(entry.id)
            }
            Err(e) => {
                error!(item = %item_id, action = %entry.action, error = %e, "Failed to write claim log");
                AuditOutcome::Failed(e.to_string())
            }
        };

        Ok(ReviewOutcome { transition, audit })
    }

    /// Claimed items awaiting review, most recent claim first
    #[instrument(skip(self), fields(admin = %admin.id))]
    pub async fn list_pending_claims(&self, admin: &Actor) -> Result<Vec<PendingClaimSummary>, ClaimError> {
        ensure_admin(admin)?;
        let mut claimed = self.items.list_by_status(ItemStatus::Claimed).await?;
        claimed.sort_by(|a, b| {
            let at = |i: &domain_items::Item| i.claim.as_ref().map(|c| c.claimed_at);
            at(b).cmp(&at(a))
        });

        let mut summaries = Vec::with_capacity(claimed.len());
        for item in &claimed {
            let claimant = match item.claimant() {
                Some(id) => self.lookup(id).await,
                None => None,
            };
            if let Some(summary) = PendingClaimSummary::project(item, claimant.as_ref()) {
                summaries.push(summary);
            }
        }
        Ok(summaries)
    }

    /// Items flagged high-value, newest report first
    #[instrument(skip(self), fields(admin = %admin.id))]
    pub async fn list_high_value_items(&self, admin: &Actor) -> Result<Vec<HighValueItemSummary>, ClaimError> {
        ensure_admin(admin)?;
        let mut items = self.items.list_items().await?;
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items.iter().filter_map(HighValueItemSummary::project).collect())
    }

    /// Most recent audit entries, newest first
    #[instrument(skip(self), fields(admin = %admin.id))]
    pub async fn list_claim_logs(&self, admin: &Actor) -> Result<Vec<ClaimLog>, ClaimError> {
        ensure_admin(admin)?;
        Ok(self.claim_logs.list_recent(self.claim_log_limit).await?)
    }

    /// Closed claims of an item, oldest first
    ///
    /// History outlives the item, so a deleted item still returns its records.
    #[instrument(skip(self), fields(admin = %admin.id))]
    pub async fn claim_history(&self, admin: &Actor, item_id: ItemId) -> Result<Vec<ClaimRecord>, ClaimError> {
        ensure_admin(admin)?;
        Ok(self.history.list_for_item(item_id).await?)
    }

    async fn lookup(&self, id: UserId) -> Option<User> {
        self.users.find_user(id).await.unwrap_or_else(|e| {
            warn!(user = %id, error = %e, "User lookup failed");
            None
        })
    }
}

fn ensure_admin(actor: &Actor) -> Result<(), ClaimError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(ClaimError::not_authorized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{mock::MockClaimLogPort, ClaimAction};
    use crate::history::mock::MockClaimHistoryPort;
    use crate::notification::mock::MockNotificationPort;
    use domain_items::{ClaimDetails, Item, ItemType, MockItemPort, NewItem};
    use domain_users::{MockUserPort, Role};

    struct Fixture {
        review: AdminReviewService,
        engine: Arc<ClaimLifecycleService>,
        logs: Arc<MockClaimLogPort>,
        users: Arc<MockUserPort>,
        items: Arc<MockItemPort>,
        admin: User,
        claimant: User,
        item: Item,
    }

    async fn fixture() -> Fixture {
        let reporter = User::new("Una", "una@campus.edu", Role::Student);
        let claimant = User::new("Uri", "uri@campus.edu", Role::Student);
        let admin = User::new("Ada", "ada@campus.edu", Role::Admin);
        let item = Item::report(
            NewItem {
                title: "Umbrella".to_string(),
                description: "Black, wooden handle".to_string(),
                item_type: ItemType::Lost,
                category: "Accessories".to_string(),
                location: "Bus stop".to_string(),
                date: Utc::now(),
                image_url: None,
                contact_method: None,
                is_high_value: false,
                is_anonymous: false,
            },
            Some(reporter.id),
        )
        .unwrap();

        let items = Arc::new(MockItemPort::with_items(vec![item.clone()]).await);
        let users = Arc::new(MockUserPort::with_users(vec![reporter, claimant.clone(), admin.clone()]).await);
        let history = Arc::new(MockClaimHistoryPort::new());
        let logs = Arc::new(MockClaimLogPort::new());
        let engine = Arc::new(ClaimLifecycleService::new(
            items.clone(),
            users.clone(),
            Arc::new(MockNotificationPort::new()),
            history.clone(),
        ));
        let review = AdminReviewService::new(engine.clone(), items.clone(), users.clone(), logs.clone(), history);

        Fixture {
            review,
            engine,
            logs,
            users,
            items,
            admin,
            claimant,
            item,
        }
    }

    #[tokio::test]
    async fn test_unknown_action_rejected_before_lookup() {
        let f = fixture().await;
        let err = f
            .review
            .review_claim(ItemId::new(), &Actor::from(&f.admin), "escalate", None)
            .await
            .unwrap_err();
        assert_eq!(err, ClaimError::invalid_argument("Invalid action"));
    }

    #[tokio::test]
    async fn test_approval_is_logged_with_snapshots() {
        let f = fixture().await;
        f.engine
            .submit_claim(f.item.id, &Actor::from(&f.claimant), ClaimDetails::default())
            .await
            .unwrap();

        let outcome = f
            .review
            .review_claim(f.item.id, &Actor::from(&f.admin), "approve", Some("Front Desk"))
            .await
            .unwrap();

        assert!(outcome.audit.is_recorded());
        let entries = f.logs.entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, ClaimAction::Approved);
        assert_eq!(entries[0].claimant_name, "Uri");
        assert_eq!(entries[0].admin_name, "Ada");
        assert_eq!(entries[0].item_title, "Umbrella");
    }

    #[tokio::test]
    async fn test_audit_failure_keeps_transition() {
        let f = fixture().await;
        f.engine
            .submit_claim(f.item.id, &Actor::from(&f.claimant), ClaimDetails::default())
            .await
            .unwrap();
        f.logs.fail_writes(true);

        let outcome = f
            .review
            .review_claim(f.item.id, &Actor::from(&f.admin), "reject", None)
            .await
            .unwrap();

        assert!(matches!(outcome.audit, AuditOutcome::Failed(_)));
        assert_eq!(outcome.transition.item.status, ItemStatus::Pending);
        assert_eq!(outcome.transition.deliveries.len(), 2);
    }

    #[tokio::test]
    async fn test_read_models_require_admin() {
        let f = fixture().await;
        let student = Actor::from(&f.claimant);
        assert!(matches!(f.review.list_pending_claims(&student).await, Err(ClaimError::Forbidden(_))));
        assert!(matches!(f.review.list_claim_logs(&student).await, Err(ClaimError::Forbidden(_))));
        assert!(matches!(f.review.list_high_value_items(&student).await, Err(ClaimError::Forbidden(_))));
        assert!(matches!(
            f.review.claim_history(&student, f.item.id).await,
            Err(ClaimError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_claim_log_limit_applies() {
        let f = fixture().await;
        let review = AdminReviewService { claim_log_limit: 1, ..f.review };
        for action in [ClaimAction::Approved, ClaimAction::Rejected] {
            f.logs
                .record(&ClaimLog {
                    id: ClaimLogId::new_v7(),
                    item_id: f.item.id,
                    item_title: "Umbrella".to_string(),
                    claimant_id: f.claimant.id,
                    claimant_name: "Uri".to_string(),
                    admin_id: f.admin.id,
                    admin_name: "Ada".to_string(),
                    action,
                    timestamp: Utc::now(),
                })
                .await
                .unwrap();
        }

        let logs = review.list_claim_logs(&Actor::from(&f.admin)).await.unwrap();
        assert_eq!(logs.len(), 1);
    }

    #[tokio::test]
    async fn test_pending_queue_survives_failed_claimant_lookup() {
        let f = fixture().await;
        f.engine
            .submit_claim(f.item.id, &Actor::from(&f.claimant), ClaimDetails::default())
            .await
            .unwrap();
        f.users.fail_lookups(true);

        let queue = f.review.list_pending_claims(&Actor::admin(f.admin.id)).await.unwrap();

        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].claimant_name, "Anonymous");
        assert_eq!(queue[0].claimant_email, "N/A");
    }

    #[tokio::test]
    async fn test_high_value_items_newest_first() {
        let f = fixture().await;
        let mut older = f.item.clone();
        older.id = ItemId::new();
        older.is_high_value = true;
        older.created_at = Utc::now() - chrono::Duration::days(2);
        let mut newer = older.clone();
        newer.id = ItemId::new();
        newer.title = "Camera".to_string();
        newer.created_at = Utc::now();
        f.items.insert(older.clone()).await;
        f.items.insert(newer.clone()).await;

        let listed = f.review.list_high_value_items(&Actor::from(&f.admin)).await.unwrap();

        let ids: Vec<_> = listed.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
        assert!(listed.iter().all(|s| s.is_high_value));
    }
}
