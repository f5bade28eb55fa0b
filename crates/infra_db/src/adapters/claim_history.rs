//! PostgreSQL Claim History Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{ClaimRecordId, DomainPort, HealthCheckResult, HealthCheckable, ItemId, PortError, UserId};
use domain_claims::{ClaimHistoryPort, ClaimOutcome, ClaimRecord};
use domain_items::ClaimDetails;

use crate::repositories::claim_history::{
    ClaimHistoryRepository, ClaimOutcome as DbClaimOutcome, ClaimRecordRow,
};

use super::{db_to_port_error, ping};

#[derive(Debug, Clone)]
pub struct PostgresClaimHistoryAdapter {
    repository: ClaimHistoryRepository,
    pool: PgPool,
}

impl PostgresClaimHistoryAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimHistoryRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresClaimHistoryAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClaimHistoryAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-claim-history-adapter").await
    }
}

#[async_trait]
impl ClaimHistoryPort for PostgresClaimHistoryAdapter {
    #[instrument(skip(self, record), fields(item_id = %record.item_id, outcome = %record.outcome))]
    async fn append(&self, record: &ClaimRecord) -> Result<(), PortError> {
        self.repository
            .insert(&ClaimRecordRow {
                claim_record_id: record.id.into(),
                item_id: record.item_id.into(),
                claimant_id: record.claimant.into(),
                description: record.details.description.clone(),
                contact_info: record.details.contact_info.clone(),
                proof_details: record.details.proof_details.clone(),
                claimed_at: record.claimed_at,
                outcome: match record.outcome {
                    ClaimOutcome::Cancelled => DbClaimOutcome::Cancelled,
                    ClaimOutcome::Rejected => DbClaimOutcome::Rejected,
                    ClaimOutcome::Approved => DbClaimOutcome::Approved,
                },
                closed_at: record.closed_at,
            })
            .await
            .map_err(db_to_port_error)
    }

    #[instrument(skip(self))]
    async fn list_for_item(&self, item_id: ItemId) -> Result<Vec<ClaimRecord>, PortError> {
        let rows = self
            .repository
            .list_for_item(item_id.into())
            .await
            .map_err(db_to_port_error)?;
        Ok(rows.into_iter().map(row_to_record).collect())
    }
}

fn row_to_record(row: ClaimRecordRow) -> ClaimRecord {
    ClaimRecord {
        id: ClaimRecordId::from(row.claim_record_id),
        item_id: ItemId::from(row.item_id),
        claimant: UserId::from(row.claimant_id),
        details: ClaimDetails {
            description: row.description,
            contact_info: row.contact_info,
            proof_details: row.proof_details,
        },
        claimed_at: row.claimed_at,
        outcome: match row.outcome {
            DbClaimOutcome::Cancelled => ClaimOutcome::Cancelled,
            DbClaimOutcome::Rejected => ClaimOutcome::Rejected,
            DbClaimOutcome::Approved => ClaimOutcome::Approved,
        },
        closed_at: row.closed_at,
    }
}
