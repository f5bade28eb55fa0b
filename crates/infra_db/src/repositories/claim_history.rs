//! Claim history repository implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

#[derive(Debug, Clone)]
pub struct ClaimHistoryRepository {
    pool: PgPool,
}

impl ClaimHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, row: &ClaimRecordRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO claim_history (
                claim_record_id, item_id, claimant_id, description, contact_info,
                proof_details, claimed_at, outcome, closed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(row.claim_record_id)
        .bind(row.item_id)
        .bind(row.claimant_id)
        .bind(&row.description)
        .bind(&row.contact_info)
        .bind(&row.proof_details)
        .bind(row.claimed_at)
        .bind(row.outcome)
        .bind(row.closed_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// An item's records, oldest first
    pub async fn list_for_item(&self, item_id: Uuid) -> Result<Vec<ClaimRecordRow>, DatabaseError> {
        Ok(sqlx::query_as::<_, ClaimRecordRow>(
            r#"
            SELECT claim_record_id, item_id, claimant_id, description, contact_info,
                   proof_details, claimed_at, outcome, closed_at
            FROM claim_history
            WHERE item_id = $1
            ORDER BY closed_at, claim_record_id
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?)
    }
}

/// Claim outcome enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "claim_outcome", rename_all = "lowercase")]
pub enum ClaimOutcome {
    Cancelled,
    Rejected,
    Approved,
}

/// Database row for a closed claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRecordRow {
    pub claim_record_id: Uuid,
    pub item_id: Uuid,
    pub claimant_id: Uuid,
    pub description: String,
    pub contact_info: String,
    pub proof_details: String,
    pub claimed_at: DateTime<Utc>,
    pub outcome: ClaimOutcome,
    pub closed_at: DateTime<Utc>,
}
