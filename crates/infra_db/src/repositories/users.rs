//! User repository implementation
//!
//! Read access to the accounts table. Accounts are created by the external
//! credential store; `insert` exists for seeding and tests.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, user_id: Uuid) -> Result<UserRow, DatabaseError> {
        sqlx::query_as::<_, UserRow>(
            "SELECT user_id, name, email, role, created_at FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("User", user_id))
    }

    /// Lists users holding a role, oldest account first
    pub async fn list_by_role(&self, role: UserRole) -> Result<Vec<UserRow>, DatabaseError> {
        Ok(sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, name, email, role, created_at
            FROM users
            WHERE role = $1
            ORDER BY created_at, user_id
            "#,
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn insert(&self, user: &UserRow) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO users (user_id, name, email, role, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.user_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DatabaseError::from(e) {
            DatabaseError::DuplicateEntry(_) => DatabaseError::duplicate("User", "email", &user.email),
            other => other,
        })?;
        Ok(())
    }
}

/// User role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Admin,
}

/// Database row for user
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}
