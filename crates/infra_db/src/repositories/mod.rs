//! Repository implementations for domain entities
//!
//! Repositories own the SQL. Each one maps between table rows and plain row
//! structs; the adapters turn rows into domain types.
//!
//! Queries are built at runtime with `sqlx::query_as` and `FromRow` rows,
//! so the crate compiles without a reachable database.

pub mod items;
pub mod users;
pub mod notifications;
pub mod claim_logs;
pub mod claim_history;

pub use items::ItemRepository;
pub use users::UserRepository;
pub use notifications::NotificationRepository;
pub use claim_logs::ClaimLogRepository;
pub use claim_history::ClaimHistoryRepository;
