//! Notification repository implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, row: &NotificationRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (notification_id, recipient_id, message, related_item, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(row.notification_id)
        .bind(row.recipient_id)
        .bind(&row.message)
        .bind(row.related_item)
        .bind(row.is_read)
        .bind(row.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_by_id(&self, notification_id: Uuid) -> Result<NotificationRow, DatabaseError> {
        sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT notification_id, recipient_id, message, related_item, is_read, created_at
            FROM notifications
            WHERE notification_id = $1
            "#,
        )
        .bind(notification_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Notification", notification_id))
    }

    /// A recipient's notifications, newest first
    pub async fn list_for_recipient(&self, recipient_id: Uuid) -> Result<Vec<NotificationRow>, DatabaseError> {
        Ok(sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT notification_id, recipient_id, message, related_item, is_read, created_at
            FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC, notification_id DESC
            "#,
        )
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn mark_read(&self, notification_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE notification_id = $1")
            .bind(notification_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Notification", notification_id));
        }
        Ok(())
    }
}

/// Database row for notification
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NotificationRow {
    pub notification_id: Uuid,
    pub recipient_id: Uuid,
    pub message: String,
    pub related_item: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
