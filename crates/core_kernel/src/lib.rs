//! Core Kernel - Foundational types shared by every lost-and-found crate
//!
//! This crate provides the building blocks used across the domain modules:
//! - Strongly-typed identifiers for items, users, notifications and audit rows
//! - The port contract (`PortError`, `DomainPort`, health checks) that adapters implement
//! - Common validation errors

pub mod identifiers;
pub mod ports;
pub mod error;

pub use identifiers::{
    ItemId, UserId, CommentId, NotificationId, ClaimLogId, ClaimRecordId,
};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
pub use error::CoreError;
