//! User Domain Ports
//!
//! The claim workflow consumes users read-only: it resolves display names and
//! emails for notification texts and summaries, and it fans out review
//! requests to every admin. Account creation belongs to the external
//! credential store, so the port has no write operations.
//!
//! ```rust,ignore
//! let reporter = users.find_user(reporter_id).await?;   // None => skip notification
//! let admins = users.list_admins().await?;
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError, UserId};

use crate::user::User;

/// Read-only lookup of user accounts
#[async_trait]
pub trait UserPort: DomainPort + HealthCheckable {
    /// Retrieves a user by ID
    ///
    /// # Returns
    ///
    /// The user if found, or `PortError::NotFound`
    async fn get_user(&self, id: UserId) -> Result<User, PortError>;

    /// Lists every user holding the admin role
    async fn list_admins(&self) -> Result<Vec<User>, PortError>;
}

/// Extension trait for UserPort with convenience methods
#[async_trait]
pub trait UserPortExt: UserPort {
    /// Looks up a user, mapping `NotFound` to `None`
    ///
    /// A deleted reporter or claimant is an expected situation for the claim
    /// workflow (the notification is skipped), not a failure.
    async fn find_user(&self, id: UserId) -> Result<Option<User>, PortError> {
        match self.get_user(id).await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Looks up an optional reference, short-circuiting on `None`
    async fn find_optional(&self, id: Option<UserId>) -> Result<Option<User>, PortError> {
        match id {
            Some(id) => self.find_user(id).await,
            None => Ok(None),
        }
    }
}

// Blanket implementation for all UserPort implementors
impl<T: UserPort + ?Sized> UserPortExt for T {}

/// Mock implementation of UserPort for testing
///
/// Stores users in memory; failure injection lets tests exercise the
/// "lookup failed" branches of the claim workflow.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;
    use core_kernel::HealthCheckResult;

    /// In-memory mock implementation of UserPort
    #[derive(Debug, Default)]
    pub struct MockUserPort {
        users: Arc<RwLock<HashMap<UserId, User>>>,
        fail_lookups: AtomicBool,
    }

    impl MockUserPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with users for testing
        pub async fn with_users(users: Vec<User>) -> Self {
            let port = Self::new();
            for user in users {
                port.insert(user).await;
            }
            port
        }

        /// Adds or replaces a user
        pub async fn insert(&self, user: User) {
            self.users.write().await.insert(user.id, user);
        }

        /// Removes a user, simulating a deleted account
        pub async fn remove(&self, id: UserId) {
            self.users.write().await.remove(&id);
        }

        /// Makes every subsequent lookup fail with a connection error
        pub fn fail_lookups(&self, fail: bool) {
            self.fail_lookups.store(fail, Ordering::SeqCst);
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.fail_lookups.load(Ordering::SeqCst) {
                return Err(PortError::connection("user store unavailable"));
            }
            Ok(())
        }
    }

    impl DomainPort for MockUserPort {}

    #[async_trait]
    impl HealthCheckable for MockUserPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-user-port")
        }
    }

    #[async_trait]
    impl UserPort for MockUserPort {
        async fn get_user(&self, id: UserId) -> Result<User, PortError> {
            self.check_available()?;
            self.users
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("User", id))
        }

        async fn list_admins(&self) -> Result<Vec<User>, PortError> {
            self.check_available()?;
            let mut admins: Vec<User> = self
                .users
                .read()
                .await
                .values()
                .filter(|u| u.is_admin())
                .cloned()
                .collect();
            admins.sort_by_key(|u| u.id);
            Ok(admins)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::MockUserPort;
    use crate::user::Role;

    #[tokio::test]
    async fn test_mock_port_get_and_missing() {
        let alice = User::new("Alice", "alice@campus.edu", Role::Student);
        let port = MockUserPort::with_users(vec![alice.clone()]).await;

        assert_eq!(port.get_user(alice.id).await.unwrap(), alice);
        assert!(port.get_user(UserId::new()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_find_user_maps_not_found_to_none() {
        let port = MockUserPort::new();
        assert!(port.find_user(UserId::new()).await.unwrap().is_none());
        assert!(port.find_optional(None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_user_propagates_store_failure() {
        let port = MockUserPort::new();
        port.fail_lookups(true);
        assert!(port.find_user(UserId::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_list_admins_filters_by_role() {
        let port = MockUserPort::with_users(vec![
            User::new("Alice", "alice@campus.edu", Role::Student),
            User::new("Dana", "dana.admin@campus.edu", Role::Admin),
            User::new("Eli", "eli.admin@campus.edu", Role::Admin),
        ])
        .await;

        let admins = port.list_admins().await.unwrap();
        assert_eq!(admins.len(), 2);
        assert!(admins.iter().all(User::is_admin));
    }
}
