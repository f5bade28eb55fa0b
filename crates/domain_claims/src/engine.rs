//! Claim Lifecycle Engine
//!
//! Every operation runs the same pipeline:
//!
//! 1. Load the item (`NotFound` if absent)
//! 2. Apply the transition to the in-memory aggregate; a refused precondition
//!    returns here with nothing written
//! 3. Commit with a conditional write guarded by the status (and claimant)
//!    that was read in step 1
//! 4. Archive the closed claim, if any
//! 5. Write notifications, one attempt per recipient
//!
//! Steps 4 and 5 only run after step 3 commits. Their failures are logged
//! and reported in the [`TransitionOutcome`], never returned as errors.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use core_kernel::{ItemId, UserId};
use domain_items::{ClaimDetails, Item, ItemError, ItemEvent, ItemPort, ItemPortExt};
use domain_users::{Actor, UserPort, UserPortExt};

use crate::audit::ReviewDecision;
use crate::error::ClaimError;
use crate::history::{ClaimHistoryPort, ClaimRecord};
use crate::notification::{Notification, NotificationPort};
use crate::outcome::{DeliveryAttempt, DeliveryOutcome, TransitionOutcome};
use crate::rules::{plan_notifications, Audience, AudienceNeeds, Contact};

/// Orchestrates claim transitions and their side effects
pub struct ClaimLifecycleService {
    items: Arc<dyn ItemPort>,
    users: Arc<dyn UserPort>,
    notifications: Arc<dyn NotificationPort>,
    history: Arc<dyn ClaimHistoryPort>,
}

impl ClaimLifecycleService {
    pub fn new(
        items: Arc<dyn ItemPort>,
        users: Arc<dyn UserPort>,
        notifications: Arc<dyn NotificationPort>,
        history: Arc<dyn ClaimHistoryPort>,
    ) -> Self {
        Self {
            items,
            users,
            notifications,
            history,
        }
    }

    /// Opens a claim on a pending item
    ///
    /// # Errors
    ///
    /// - `NotFound` if the item does not exist
    /// - `InvalidState` if the item is not pending
    /// - `Forbidden` if the requester reported the item
    #[instrument(skip(self, details), fields(item = %item_id, user = %actor.id))]
    pub async fn submit_claim(
        &self,
        item_id: ItemId,
        actor: &Actor,
        details: ClaimDetails,
    ) -> Result<TransitionOutcome, ClaimError> {
        let now = Utc::now();
        let (item, event) = self
            .transition(item_id, |item| item.submit_claim(actor.id, details.clone(), now))
            .await?;
        info!("Claim submitted");
        Ok(self.after_commit(item, event).await)
    }

    /// Withdraws the requester's claim and reopens the item
    ///
    /// # Errors
    ///
    /// - `NotFound` if the item does not exist
    /// - `InvalidState` if the item is not claimed
    /// - `Forbidden` if the requester is not the claimant
    #[instrument(skip(self), fields(item = %item_id, user = %actor.id))]
    pub async fn cancel_claim(&self, item_id: ItemId, actor: &Actor) -> Result<TransitionOutcome, ClaimError> {
        let (item, event) = self
            .transition(item_id, |item| item.cancel_claim(actor.id))
            .await?;
        info!("Claim cancelled");
        Ok(self.after_commit(item, event).await)
    }

    /// Approves or rejects the claim held by an item
    ///
    /// The pickup location is only read for approvals.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the actor is not an admin
    /// - `NotFound` if the item does not exist
    /// - `InvalidArgument` if an approval has no pickup location
    /// - `InvalidState` if the item is not claimed
    #[instrument(skip(self), fields(item = %item_id, admin = %actor.id))]
    pub async fn admin_review(
        &self,
        item_id: ItemId,
        actor: &Actor,
        decision: ReviewDecision,
        pickup_location: Option<&str>,
    ) -> Result<TransitionOutcome, ClaimError> {
        if !actor.is_admin() {
            return Err(ClaimError::not_authorized());
        }
        let pickup = pickup_location.unwrap_or_default();
        let (item, event) = self
            .transition(item_id, |item| match decision {
                ReviewDecision::Approve => item.approve_claim(pickup),
                ReviewDecision::Reject => item.reject_claim(),
            })
            .await?;
        info!(decision = ?decision, "Claim reviewed");
        Ok(self.after_commit(item, event).await)
    }

    /// Loads, transitions and conditionally commits an item
    ///
    /// On a lost race the transition is replayed against the fresh record so
    /// the caller gets the same error it would have got had it read last.
    async fn transition<F>(&self, item_id: ItemId, apply: F) -> Result<(Item, ItemEvent), ClaimError>
    where
        F: Fn(&mut Item) -> Result<ItemEvent, ItemError> + Send + Sync,
    {
        let mut item = self.load(item_id).await?;
        let guard = item.guard();
        let event = apply(&mut item)?;

        if self.items.apply_transition(&item, guard).await? {
            return Ok((item, event));
        }

        warn!(item = %item_id, expected = %guard.status, "Conditional write lost a race");
        let mut current = self.load(item_id).await?;
        let status = current.status;
        apply(&mut current)?;
        Err(ClaimError::InvalidState {
            message: format!(
                "Item was modified by another request (current status: {})",
                status
            ),
            status: Some(status),
        })
    }

    async fn load(&self, item_id: ItemId) -> Result<Item, ClaimError> {
        self.items
            .find_item(item_id)
            .await?
            .ok_or_else(ClaimError::item_not_found)
    }

    async fn after_commit(&self, item: Item, event: ItemEvent) -> TransitionOutcome {
        let archived = self.archive(&event).await;
        let audience = self.resolve_audience(&event).await;
        let mut deliveries = Vec::new();

        for planned in plan_notifications(&event, &item, &audience) {
            let notification = Notification::new(planned.recipient, planned.message, Some(item.id));
            let outcome = match self.notifications.create(&notification).await {
                Ok(()) => DeliveryOutcome::Delivered(notification.id),
                Err(e) => {
                    warn!(
                        recipient = %planned.recipient,
                        item = %item.id,
                        error = %e,
                        "Failed to create notification"
                    );
                    DeliveryOutcome::Failed(e.to_string())
                }
            };
            deliveries.push(DeliveryAttempt {
                recipient: planned.recipient,
                outcome,
            });
        }

        debug!(
            event = event.event_type(),
            delivered = deliveries.iter().filter(|d| d.is_delivered()).count(),
            attempted = deliveries.len(),
            "Side effects complete"
        );

        TransitionOutcome {
            item,
            event,
            deliveries,
            archived,
        }
    }

    async fn archive(&self, event: &ItemEvent) -> bool {
        let Some(record) = ClaimRecord::from_event(event) else {
            return false;
        };
        match self.history.append(&record).await {
            Ok(()) => true,
            Err(e) => {
                warn!(item = %record.item_id, claimant = %record.claimant, error = %e, "Failed to archive closed claim");
                false
            }
        }
    }

    async fn resolve_audience(&self, event: &ItemEvent) -> Audience {
        let needs = AudienceNeeds::for_event(event);

        let reporter = match event.reporter() {
            Some(id) => self.contact(id, "reporter").await,
            None => None,
        };
        let claimant = if needs.claimant {
            self.contact(event.claimant(), "claimant").await
        } else {
            None
        };
        let admins = if needs.admins {
            self.users.list_admins().await.unwrap_or_else(|e| {
                warn!(item = %event.item_id(), error = %e, "Failed to list admins; review request not sent");
                Vec::new()
            })
        } else {
            Vec::new()
        };

        Audience {
            reporter,
            claimant,
            admins,
        }
    }

    /// Looks up a party to notify
    ///
    /// A deleted user is skipped. A failed lookup still yields a contact so
    /// the notification is attempted without display details.
    async fn contact(&self, id: UserId, role: &str) -> Option<Contact> {
        match self.users.find_user(id).await {
            Ok(Some(user)) => Some(Contact::resolved(user)),
            Ok(None) => {
                debug!(user = %id, role, "Party no longer exists; skipping notification");
                None
            }
            Err(e) => {
                warn!(user = %id, role, error = %e, "User lookup failed; notifying without details");
                Some(Contact::unresolved(id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::mock::MockClaimHistoryPort;
    use crate::notification::mock::MockNotificationPort;
    use domain_items::{ItemStatus, ItemType, MockItemPort, NewItem};
    use domain_users::{MockUserPort, Role, User};

    struct Harness {
        items: Arc<MockItemPort>,
        notifications: Arc<MockNotificationPort>,
        history: Arc<MockClaimHistoryPort>,
        service: ClaimLifecycleService,
        reporter: User,
        claimant: User,
        admin: User,
        item: Item,
    }

    async fn harness() -> Harness {
        let reporter = User::new("Una", "una@campus.edu", Role::Student);
        let claimant = User::new("Uri", "uri@campus.edu", Role::Student);
        let admin = User::new("Ada", "ada@campus.edu", Role::Admin);
        let item = Item::report(
            NewItem {
                title: "Silver ring".to_string(),
                description: "Engraved band".to_string(),
                item_type: ItemType::Found,
                category: "Jewelry".to_string(),
                location: "Cafeteria".to_string(),
                date: Utc::now(),
                image_url: None,
                contact_method: None,
                is_high_value: true,
                is_anonymous: false,
            },
            Some(reporter.id),
        )
        .unwrap();

        let items = Arc::new(MockItemPort::with_items(vec![item.clone()]).await);
        let users = Arc::new(MockUserPort::with_users(vec![reporter.clone(), claimant.clone(), admin.clone()]).await);
        let notifications = Arc::new(MockNotificationPort::new());
        let history = Arc::new(MockClaimHistoryPort::new());
        let service = ClaimLifecycleService::new(items.clone(), users, notifications.clone(), history.clone());

        Harness {
            items,
            notifications,
            history,
            service,
            reporter,
            claimant,
            admin,
            item,
        }
    }

    #[tokio::test]
    async fn test_submit_notifies_reporter_and_admins() {
        let h = harness().await;
        let outcome = h
            .service
            .submit_claim(h.item.id, &Actor::from(&h.claimant), ClaimDetails::default())
            .await
            .unwrap();

        assert_eq!(outcome.item.status, ItemStatus::Claimed);
        assert_eq!(outcome.delivered_to(h.reporter.id), 1);
        assert_eq!(outcome.delivered_to(h.admin.id), 1);
        assert!(!outcome.archived);
        assert_eq!(h.notifications.count_for(h.claimant.id).await, 0);
    }

    #[tokio::test]
    async fn test_refused_submit_writes_nothing() {
        let h = harness().await;
        let err = h
            .service
            .submit_claim(h.item.id, &Actor::from(&h.reporter), ClaimDetails::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ClaimError::Forbidden(_)));
        assert_eq!(h.items.transition_writes(), 0);
        assert!(h.notifications.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_fail_submit() {
        let h = harness().await;
        h.notifications.fail_for(h.reporter.id).await;

        let outcome = h
            .service
            .submit_claim(h.item.id, &Actor::from(&h.claimant), ClaimDetails::default())
            .await
            .unwrap();

        assert_eq!(outcome.failed_deliveries().count(), 1);
        assert_eq!(outcome.delivered_to(h.admin.id), 1);
        assert_eq!(h.items.snapshot(h.item.id).await.unwrap().status, ItemStatus::Claimed);
    }

    #[tokio::test]
    async fn test_reject_archives_claim() {
        let h = harness().await;
        h.service
            .submit_claim(h.item.id, &Actor::from(&h.claimant), ClaimDetails::default())
            .await
            .unwrap();

        let outcome = h
            .service
            .admin_review(h.item.id, &Actor::from(&h.admin), ReviewDecision::Reject, None)
            .await
            .unwrap();

        assert!(outcome.archived);
        assert_eq!(h.history.list_for_item(h.item.id).await.unwrap().len(), 1);
        assert_eq!(outcome.delivered_to(h.claimant.id), 1);
        assert_eq!(outcome.delivered_to(h.reporter.id), 1);
    }

    #[tokio::test]
    async fn test_review_by_student_forbidden() {
        let h = harness().await;
        let err = h
            .service
            .admin_review(h.item.id, &Actor::from(&h.claimant), ReviewDecision::Approve, Some("Desk"))
            .await
            .unwrap_err();
        assert_eq!(err, ClaimError::not_authorized());
    }

    /// Item store where a competing claim lands between read and write
    struct RacingItemPort {
        inner: Arc<MockItemPort>,
        rival: UserId,
    }

    impl core_kernel::DomainPort for RacingItemPort {}

    #[async_trait::async_trait]
    impl core_kernel::HealthCheckable for RacingItemPort {
        async fn health_check(&self) -> core_kernel::HealthCheckResult {
            core_kernel::HealthCheckResult::healthy("racing-item-port")
        }
    }

    #[async_trait::async_trait]
    impl ItemPort for RacingItemPort {
        async fn get_item(&self, id: ItemId) -> Result<Item, core_kernel::PortError> {
            self.inner.get_item(id).await
        }
        async fn list_items(&self) -> Result<Vec<Item>, core_kernel::PortError> {
            self.inner.list_items().await
        }
        async fn list_by_status(&self, status: ItemStatus) -> Result<Vec<Item>, core_kernel::PortError> {
            self.inner.list_by_status(status).await
        }
        async fn create_item(&self, item: &Item) -> Result<(), core_kernel::PortError> {
            self.inner.create_item(item).await
        }
        async fn update_details(&self, item: &Item) -> Result<(), core_kernel::PortError> {
            self.inner.update_details(item).await
        }
        async fn delete_item(&self, id: ItemId) -> Result<(), core_kernel::PortError> {
            self.inner.delete_item(id).await
        }
        async fn add_comment(&self, id: ItemId, comment: &domain_items::Comment) -> Result<(), core_kernel::PortError> {
            self.inner.add_comment(id, comment).await
        }
        async fn apply_transition(
            &self,
            next: &Item,
            guard: domain_items::TransitionGuard,
        ) -> Result<bool, core_kernel::PortError> {
            if let Some(mut current) = self.inner.snapshot(next.id).await {
                if current.status == ItemStatus::Pending {
                    let rival_guard = current.guard();
                    current.submit_claim(self.rival, ClaimDetails::default(), Utc::now()).unwrap();
                    self.inner.apply_transition(&current, rival_guard).await?;
                }
            }
            self.inner.apply_transition(next, guard).await
        }
    }

    #[tokio::test]
    async fn test_lost_race_reports_current_status() {
        let h = harness().await;
        let rival = UserId::new();
        let racing = Arc::new(RacingItemPort {
            inner: h.items.clone(),
            rival,
        });
        let users = Arc::new(MockUserPort::with_users(vec![h.reporter.clone(), h.admin.clone()]).await);
        let service = ClaimLifecycleService::new(racing, users, h.notifications.clone(), h.history.clone());

        let err = service
            .submit_claim(h.item.id, &Actor::from(&h.claimant), ClaimDetails::default())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(ItemStatus::Claimed));
        assert_eq!(err.to_string(), "Item is already claimed");
        assert_eq!(h.items.snapshot(h.item.id).await.unwrap().claimant(), Some(rival));
        assert!(h.notifications.all().await.is_empty());
    }
}
