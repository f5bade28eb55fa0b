//! PostgreSQL Claim Log Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{ClaimLogId, DomainPort, HealthCheckResult, HealthCheckable, ItemId, PortError, UserId};
use domain_claims::{ClaimAction, ClaimLog, ClaimLogPort};

use crate::repositories::claim_logs::{ClaimAction as DbClaimAction, ClaimLogRepository, ClaimLogRow};

use super::{db_to_port_error, ping};

#[derive(Debug, Clone)]
pub struct PostgresClaimLogAdapter {
    repository: ClaimLogRepository,
    pool: PgPool,
}

impl PostgresClaimLogAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimLogRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresClaimLogAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClaimLogAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-claim-log-adapter").await
    }
}

#[async_trait]
impl ClaimLogPort for PostgresClaimLogAdapter {
    #[instrument(skip(self, entry), fields(item_id = %entry.item_id, action = %entry.action))]
    async fn record(&self, entry: &ClaimLog) -> Result<(), PortError> {
        self.repository
            .insert(&ClaimLogRow {
                claim_log_id: entry.id.into(),
                item_id: entry.item_id.into(),
                item_title: entry.item_title.clone(),
                claimant_id: entry.claimant_id.into(),
                claimant_name: entry.claimant_name.clone(),
                admin_id: entry.admin_id.into(),
                admin_name: entry.admin_name.clone(),
                action: match entry.action {
                    ClaimAction::Approved => DbClaimAction::Approved,
                    ClaimAction::Rejected => DbClaimAction::Rejected,
                },
                logged_at: entry.timestamp,
            })
            .await
            .map_err(db_to_port_error)
    }

    #[instrument(skip(self))]
    async fn list_recent(&self, limit: usize) -> Result<Vec<ClaimLog>, PortError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = self.repository.list_recent(limit).await.map_err(db_to_port_error)?;
        Ok(rows.into_iter().map(row_to_log).collect())
    }
}

fn row_to_log(row: ClaimLogRow) -> ClaimLog {
    ClaimLog {
        id: ClaimLogId::from(row.claim_log_id),
        item_id: ItemId::from(row.item_id),
        item_title: row.item_title,
        claimant_id: UserId::from(row.claimant_id),
        claimant_name: row.claimant_name,
        admin_id: UserId::from(row.admin_id),
        admin_name: row.admin_name,
        action: match row.action {
            DbClaimAction::Approved => ClaimAction::Approved,
            DbClaimAction::Rejected => ClaimAction::Rejected,
        },
        timestamp: row.logged_at,
    }
}
