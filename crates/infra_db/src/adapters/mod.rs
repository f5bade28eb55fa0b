//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Architecture
//!
//! Each domain has a corresponding adapter that:
//! - Implements the domain's port trait
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresItemAdapter;
//! use domain_items::ItemPort;
//!
//! let adapter = PostgresItemAdapter::new(pool);
//! let item = adapter.get_item(item_id).await?;
//! ```

pub mod items;
pub mod users;
pub mod notifications;
pub mod claim_logs;
pub mod claim_history;

pub use items::PostgresItemAdapter;
pub use users::PostgresUserAdapter;
pub use notifications::PostgresNotificationAdapter;
pub use claim_logs::PostgresClaimLogAdapter;
pub use claim_history::PostgresClaimHistoryAdapter;

use std::time::Instant;

use chrono::Utc;
use sqlx::PgPool;

use core_kernel::{AdapterHealth, HealthCheckResult, PortError};

use crate::error::DatabaseError;

/// Translates database errors into port errors
///
/// - `NotFound` -> `PortError::NotFound`
/// - constraint violations -> `PortError::Conflict`
/// - connection and pool errors -> `PortError::Connection`
/// - everything else -> `PortError::Internal`
pub(crate) fn db_to_port_error(e: DatabaseError) -> PortError {
    match e {
        DatabaseError::NotFound { entity, id } => PortError::not_found(entity, id),
        e if e.is_constraint_violation() => PortError::conflict(e.to_string()),
        e if e.is_connection_error() => PortError::Connection {
            message: e.to_string(),
            source: Some(Box::new(e)),
        },
        e => PortError::Internal {
            message: e.to_string(),
            source: Some(Box::new(e)),
        },
    }
}

/// Runs `SELECT 1` and reports the round trip
pub(crate) async fn ping(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = Instant::now();

    let result = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await;

    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthCheckResult {
            adapter_id: adapter_id.to_string(),
            status: AdapterHealth::Healthy,
            latency_ms,
            message: None,
            checked_at: Utc::now(),
        },
        Err(e) => HealthCheckResult {
            adapter_id: adapter_id.to_string(),
            status: AdapterHealth::Unhealthy,
            latency_ms,
            message: Some(format!("Database error: {}", e)),
            checked_at: Utc::now(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_keeps_entity() {
        let err = db_to_port_error(DatabaseError::not_found("Item", "ITM-1"));
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Item"));
    }

    #[test]
    fn test_pool_exhaustion_is_transient() {
        assert!(db_to_port_error(DatabaseError::PoolExhausted).is_transient());
    }

    #[test]
    fn test_duplicate_becomes_conflict() {
        let err = db_to_port_error(DatabaseError::duplicate("User", "email", "x@campus.edu"));
        assert!(matches!(err, PortError::Conflict { .. }));
    }
}
