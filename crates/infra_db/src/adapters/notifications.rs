//! PostgreSQL Notification Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{
    DomainPort, HealthCheckResult, HealthCheckable, ItemId, NotificationId, PortError, UserId,
};
use domain_claims::{Notification, NotificationPort};

use crate::repositories::notifications::{NotificationRepository, NotificationRow};

use super::{db_to_port_error, ping};

#[derive(Debug, Clone)]
pub struct PostgresNotificationAdapter {
    repository: NotificationRepository,
    pool: PgPool,
}

impl PostgresNotificationAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: NotificationRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresNotificationAdapter {}

#[async_trait]
impl HealthCheckable for PostgresNotificationAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-notification-adapter").await
    }
}

#[async_trait]
impl NotificationPort for PostgresNotificationAdapter {
    #[instrument(skip(self, notification), fields(recipient = %notification.recipient))]
    async fn create(&self, notification: &Notification) -> Result<(), PortError> {
        self.repository
            .insert(&NotificationRow {
                notification_id: notification.id.into(),
                recipient_id: notification.recipient.into(),
                message: notification.message.clone(),
                related_item: notification.related_item.map(Into::into),
                is_read: notification.read,
                created_at: notification.created_at,
            })
            .await
            .map_err(db_to_port_error)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: NotificationId) -> Result<Notification, PortError> {
        self.repository
            .get_by_id(id.into())
            .await
            .map(row_to_notification)
            .map_err(db_to_port_error)
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, recipient: UserId) -> Result<Vec<Notification>, PortError> {
        let rows = self
            .repository
            .list_for_recipient(recipient.into())
            .await
            .map_err(db_to_port_error)?;
        Ok(rows.into_iter().map(row_to_notification).collect())
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: NotificationId) -> Result<(), PortError> {
        self.repository.mark_read(id.into()).await.map_err(db_to_port_error)
    }
}

fn row_to_notification(row: NotificationRow) -> Notification {
    Notification {
        id: NotificationId::from(row.notification_id),
        recipient: UserId::from(row.recipient_id),
        message: row.message,
        related_item: row.related_item.map(ItemId::from),
        read: row.is_read,
        created_at: row.created_at,
    }
}
