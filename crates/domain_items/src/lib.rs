//! Item Record Domain
//!
//! This crate owns the `Item` aggregate: a reported lost or found object, its
//! single-slot active claim, and its comment thread.
//!
//! # Claim State Machine
//!
//! ```text
//! pending  --submit_claim (non-reporter)-->  claimed
//! claimed  --cancel_claim (claimant)------>  pending   (claim cleared)
//! claimed  --approve_claim (pickup)------->  resolved  (claim kept for history)
//! claimed  --reject_claim----------------->  pending   (claim cleared)
//! ```
//!
//! `resolved` has no outgoing transition. `rejected` is a reserved terminal
//! status: it can be stored and read back, but no transition produces it.
//!
//! Every transition validates first and mutates second, so a failed
//! transition leaves the aggregate untouched.

pub mod item;
pub mod comment;
pub mod events;
pub mod error;
pub mod ports;

pub use item::{
    Item, ItemType, ItemStatus, ClaimDetails, ActiveClaim, NewItem, ItemDetailsUpdate,
    TransitionGuard,
};
pub use comment::Comment;
pub use events::ItemEvent;
pub use error::ItemError;
pub use ports::{ItemPort, ItemPortExt};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockItemPort;
