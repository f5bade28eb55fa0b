//! Claim log repository implementation
//!
//! Append-only: there is no update or delete.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

#[derive(Debug, Clone)]
pub struct ClaimLogRepository {
    pool: PgPool,
}

impl ClaimLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, row: &ClaimLogRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO claim_logs (
                claim_log_id, item_id, item_title, claimant_id, claimant_name,
                admin_id, admin_name, action, logged_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(row.claim_log_id)
        .bind(row.item_id)
        .bind(&row.item_title)
        .bind(row.claimant_id)
        .bind(&row.claimant_name)
        .bind(row.admin_id)
        .bind(&row.admin_name)
        .bind(row.action)
        .bind(row.logged_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// The latest entries, newest first
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<ClaimLogRow>, DatabaseError> {
        Ok(sqlx::query_as::<_, ClaimLogRow>(
            r#"
            SELECT claim_log_id, item_id, item_title, claimant_id, claimant_name,
                   admin_id, admin_name, action, logged_at
            FROM claim_logs
            ORDER BY logged_at DESC, claim_log_id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }
}

/// Claim action enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "claim_action", rename_all = "lowercase")]
pub enum ClaimAction {
    Approved,
    Rejected,
}

/// Database row for claim log
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimLogRow {
    pub claim_log_id: Uuid,
    pub item_id: Uuid,
    pub item_title: String,
    pub claimant_id: Uuid,
    pub claimant_name: String,
    pub admin_id: Uuid,
    pub admin_name: String,
    pub action: ClaimAction,
    pub logged_at: DateTime<Utc>,
}
