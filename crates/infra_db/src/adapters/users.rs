//! PostgreSQL User Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError, UserId};
use domain_users::{Role, User, UserPort};

use crate::repositories::users::{UserRepository, UserRole, UserRow};

use super::{db_to_port_error, ping};

/// PostgreSQL-backed implementation of the UserPort trait
#[derive(Debug, Clone)]
pub struct PostgresUserAdapter {
    repository: UserRepository,
    pool: PgPool,
}

impl PostgresUserAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool.clone()),
            pool,
        }
    }

    /// Inserts an account; used for seeding since sign-up lives elsewhere
    pub async fn insert_user(&self, user: &User) -> Result<(), PortError> {
        self.repository
            .insert(&user_to_row(user))
            .await
            .map_err(db_to_port_error)
    }
}

impl DomainPort for PostgresUserAdapter {}

#[async_trait]
impl HealthCheckable for PostgresUserAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-user-adapter").await
    }
}

#[async_trait]
impl UserPort for PostgresUserAdapter {
    #[instrument(skip(self), fields(user_id = %id))]
    async fn get_user(&self, id: UserId) -> Result<User, PortError> {
        debug!("Fetching user by ID");
        self.repository
            .get_by_id(id.into())
            .await
            .map(row_to_user)
            .map_err(db_to_port_error)
    }

    #[instrument(skip(self))]
    async fn list_admins(&self) -> Result<Vec<User>, PortError> {
        let rows = self
            .repository
            .list_by_role(UserRole::Admin)
            .await
            .map_err(db_to_port_error)?;
        Ok(rows.into_iter().map(row_to_user).collect())
    }
}

fn row_to_user(row: UserRow) -> User {
    User {
        id: UserId::from(row.user_id),
        name: row.name,
        email: row.email,
        role: match row.role {
            UserRole::Student => Role::Student,
            UserRole::Admin => Role::Admin,
        },
        created_at: row.created_at,
    }
}

fn user_to_row(user: &User) -> UserRow {
    UserRow {
        user_id: user.id.into(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: match user.role {
            Role::Student => UserRole::Student,
            Role::Admin => UserRole::Admin,
        },
        created_at: user.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_survives_row_mapping() {
        let admin = User::new("Ada", "ada@campus.edu", Role::Admin);
        let back = row_to_user(user_to_row(&admin));
        assert_eq!(back.role, Role::Admin);
        assert_eq!(back.id, admin.id);
    }
}
