//! User Domain
//!
//! Registration, login and password handling live outside this system. What the
//! claim workflow needs from the identity side is small:
//!
//! - an [`Actor`]: the authenticated requester (id + role) on every call
//! - a [`UserPort`]: lookup of display names/emails and the set of admins to notify
//!
//! # Examples
//!
//! ```rust
//! use domain_users::{Actor, Role, User};
//!
//! let admin = User::new("Dana Admin", "dana.admin@campus.edu", Role::Admin);
//! let actor = Actor::from(&admin);
//! assert!(actor.is_admin());
//! ```

pub mod user;
pub mod ports;

pub use user::{User, Role, Actor};
pub use ports::{UserPort, UserPortExt};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockUserPort;
