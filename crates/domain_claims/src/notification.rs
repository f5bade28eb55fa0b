//! Notification Sink
//!
//! Notifications are created only as a side effect of claim transitions.
//! After creation the read flag is the single mutable field.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use core_kernel::{DomainPort, HealthCheckable, ItemId, NotificationId, PortError, UserId};
use domain_users::Actor;

use crate::error::ClaimError;

/// A message delivered to one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub recipient: UserId,
    pub message: String,
    pub related_item: Option<ItemId>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates an unread notification
    pub fn new(recipient: UserId, message: impl Into<String>, related_item: Option<ItemId>) -> Self {
        Self {
            id: NotificationId::new_v7(),
            recipient,
            message: message.into(),
            related_item,
            read: false,
            created_at: Utc::now(),
        }
    }
}

/// Append-only per-user notification store
#[async_trait]
pub trait NotificationPort: DomainPort + HealthCheckable {
    /// Stores a new notification
    async fn create(&self, notification: &Notification) -> Result<(), PortError>;

    /// Retrieves a notification by ID
    async fn get(&self, id: NotificationId) -> Result<Notification, PortError>;

    /// Lists a user's notifications, newest first
    async fn list_for_user(&self, recipient: UserId) -> Result<Vec<Notification>, PortError>;

    /// Sets the read flag
    async fn mark_read(&self, id: NotificationId) -> Result<(), PortError>;
}

/// Read side of the sink as seen by the notified user
pub struct NotificationInbox {
    notifications: Arc<dyn NotificationPort>,
}

impl NotificationInbox {
    pub fn new(notifications: Arc<dyn NotificationPort>) -> Self {
        Self { notifications }
    }

    /// The actor's own notifications, newest first
    #[instrument(skip(self), fields(user = %actor.id))]
    pub async fn list(&self, actor: &Actor) -> Result<Vec<Notification>, ClaimError> {
        Ok(self.notifications.list_for_user(actor.id).await?)
    }

    /// Marks one of the actor's notifications as read
    ///
    /// # Errors
    ///
    /// - `NotFound` if the notification does not exist
    /// - `Forbidden` if it belongs to another user
    #[instrument(skip(self), fields(user = %actor.id))]
    pub async fn mark_read(&self, actor: &Actor, id: NotificationId) -> Result<Notification, ClaimError> {
        let mut notification = self.notifications.get(id).await.map_err(|e| {
            if e.is_not_found() {
                ClaimError::NotFound("Notification not found".to_string())
            } else {
                ClaimError::from(e)
            }
        })?;
        if notification.recipient != actor.id {
            return Err(ClaimError::not_authorized());
        }
        if !notification.read {
            self.notifications.mark_read(id).await?;
            notification.read = true;
        }
        Ok(notification)
    }
}

/// Mock implementation of NotificationPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;
    use core_kernel::HealthCheckResult;

    /// In-memory mock implementation of NotificationPort
    ///
    /// Deliveries can be made to fail for everyone or for chosen recipients.
    #[derive(Debug, Default)]
    pub struct MockNotificationPort {
        notifications: Arc<RwLock<HashMap<NotificationId, Notification>>>,
        failing_recipients: Arc<RwLock<HashSet<UserId>>>,
        fail_all: AtomicBool,
    }

    impl MockNotificationPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes every subsequent create fail
        pub fn fail_all(&self, fail: bool) {
            self.fail_all.store(fail, Ordering::SeqCst);
        }

        /// Makes creates addressed to `recipient` fail
        pub async fn fail_for(&self, recipient: UserId) {
            self.failing_recipients.write().await.insert(recipient);
        }

        /// Every stored notification, oldest first
        pub async fn all(&self) -> Vec<Notification> {
            let mut all: Vec<_> = self.notifications.read().await.values().cloned().collect();
            all.sort_by_key(|n| (n.created_at, n.id));
            all
        }

        pub async fn count_for(&self, recipient: UserId) -> usize {
            self.notifications
                .read()
                .await
                .values()
                .filter(|n| n.recipient == recipient)
                .count()
        }
    }

    impl DomainPort for MockNotificationPort {}

    #[async_trait]
    impl HealthCheckable for MockNotificationPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-notification-port")
        }
    }

    #[async_trait]
    impl NotificationPort for MockNotificationPort {
        async fn create(&self, notification: &Notification) -> Result<(), PortError> {
            if self.fail_all.load(Ordering::SeqCst)
                || self.failing_recipients.read().await.contains(&notification.recipient)
            {
                return Err(PortError::connection("notification store unavailable"));
            }
            self.notifications
                .write()
                .await
                .insert(notification.id, notification.clone());
            Ok(())
        }

        async fn get(&self, id: NotificationId) -> Result<Notification, PortError> {
            self.notifications
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Notification", id))
        }

        async fn list_for_user(&self, recipient: UserId) -> Result<Vec<Notification>, PortError> {
            let mut list: Vec<_> = self
                .notifications
                .read()
                .await
                .values()
                .filter(|n| n.recipient == recipient)
                .cloned()
                .collect();
            list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(list)
        }

        async fn mark_read(&self, id: NotificationId) -> Result<(), PortError> {
            let mut notifications = self.notifications.write().await;
            let stored = notifications
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Notification", id))?;
            stored.read = true;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::MockNotificationPort;

    #[tokio::test]
    async fn test_mark_read_by_recipient() {
        let port = Arc::new(MockNotificationPort::new());
        let user = UserId::new();
        let n = Notification::new(user, "hello", None);
        port.create(&n).await.unwrap();

        let inbox = NotificationInbox::new(port.clone());
        let updated = inbox.mark_read(&Actor::student(user), n.id).await.unwrap();

        assert!(updated.read);
        assert!(port.get(n.id).await.unwrap().read);
    }

    #[tokio::test]
    async fn test_mark_read_by_other_user_forbidden() {
        let port = Arc::new(MockNotificationPort::new());
        let n = Notification::new(UserId::new(), "hello", None);
        port.create(&n).await.unwrap();

        let inbox = NotificationInbox::new(port.clone());
        let err = inbox.mark_read(&Actor::admin(UserId::new()), n.id).await.unwrap_err();

        assert!(matches!(err, ClaimError::Forbidden(_)));
        assert!(!port.get(n.id).await.unwrap().read);
    }

    #[tokio::test]
    async fn test_mark_read_missing() {
        let inbox = NotificationInbox::new(Arc::new(MockNotificationPort::new()));
        let err = inbox
            .mark_read(&Actor::student(UserId::new()), NotificationId::new())
            .await
            .unwrap_err();
        assert_eq!(err, ClaimError::NotFound("Notification not found".to_string()));
    }
}
