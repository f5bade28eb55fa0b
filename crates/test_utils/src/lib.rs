//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! lost-and-found test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for users, items and claim details
//! - `builders`: Builder patterns for items in any lifecycle state
//! - `world`: The claim services wired over in-memory ports
//! - `database`: PostgreSQL test container management
//! - `assertions`: Assertion helpers for items and notifications
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod world;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use world::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
