//! In-memory claim world
//!
//! Wires [`ClaimLifecycleService`], [`AdminReviewService`] and
//! [`NotificationInbox`] over the mock ports and keeps typed handles to the
//! mocks, so a test can drive the workflow and then inspect or sabotage any
//! store.

use std::sync::Arc;

use domain_claims::{
    AdminReviewService, ClaimLifecycleService, MockClaimHistoryPort, MockClaimLogPort,
    MockNotificationPort, NotificationInbox,
};
use domain_items::{Item, MockItemPort};
use domain_users::{MockUserPort, User};

pub struct ClaimWorld {
    pub items: Arc<MockItemPort>,
    pub users: Arc<MockUserPort>,
    pub notifications: Arc<MockNotificationPort>,
    pub claim_logs: Arc<MockClaimLogPort>,
    pub history: Arc<MockClaimHistoryPort>,
    pub engine: Arc<ClaimLifecycleService>,
    pub reviews: AdminReviewService,
    pub inbox: NotificationInbox,
}

impl ClaimWorld {
    /// An empty world with the given users
    pub async fn with_users(users: Vec<User>) -> Self {
        let items = Arc::new(MockItemPort::new());
        let users = Arc::new(MockUserPort::with_users(users).await);
        let notifications = Arc::new(MockNotificationPort::new());
        let claim_logs = Arc::new(MockClaimLogPort::new());
        let history = Arc::new(MockClaimHistoryPort::new());

        let engine = Arc::new(ClaimLifecycleService::new(
            items.clone(),
            users.clone(),
            notifications.clone(),
            history.clone(),
        ));
        let reviews = AdminReviewService::new(
            engine.clone(),
            items.clone(),
            users.clone(),
            claim_logs.clone(),
            history.clone(),
        );
        let inbox = NotificationInbox::new(notifications.clone());

        Self {
            items,
            users,
            notifications,
            claim_logs,
            history,
            engine,
            reviews,
            inbox,
        }
    }

    /// Stores an item as-is and returns it
    pub async fn seed(&self, item: Item) -> Item {
        self.items.insert(item.clone()).await;
        item
    }

    /// The stored copy of an item
    pub async fn stored(&self, item: &Item) -> Item {
        self.items
            .snapshot(item.id)
            .await
            .unwrap_or_else(|| panic!("item {} is not stored", item.id))
    }
}
