//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the lost-and-found core using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: repositories own the SQL and
//! work on row structs, adapters implement the domain ports on top of them.
//!
//! # Claim Slot Concurrency
//!
//! Claim transitions never read-then-write. The item adapter issues a single
//! guarded `UPDATE ... WHERE item_id = $1 AND status = $2 [AND claimed_by = $3]`
//! and reports whether it matched, so at most one of two racing claims wins.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//! use infra_db::adapters::PostgresItemAdapter;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/lost_found")).await?;
//! run_migrations(&pool).await?;
//! let items = PostgresItemAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig, MIGRATOR};
pub use error::DatabaseError;
pub use adapters::{
    PostgresItemAdapter, PostgresUserAdapter, PostgresNotificationAdapter,
    PostgresClaimLogAdapter, PostgresClaimHistoryAdapter,
};
