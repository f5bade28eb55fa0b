//! Item repository implementation
//!
//! Items and their comments. Status and claim columns are only written by
//! [`ItemRepository::insert`] and the conditional
//! [`ItemRepository::update_claim_slot`].

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for items and their comments
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

const ITEM_COLUMNS: &str = r#"
    item_id, title, description, item_type, category, location, item_date,
    status, image_url, reported_by, contact_method, is_high_value, is_anonymous,
    claimed_by, claim_description, claim_contact_info, claim_proof_details,
    claimed_at, created_at
"#;

impl ItemRepository {
    /// Creates a new ItemRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves an item by its identifier
    ///
    /// # Returns
    ///
    /// The item row or NotFound error
    pub async fn get_by_id(&self, item_id: Uuid) -> Result<ItemRow, DatabaseError> {
        let sql = format!("SELECT {} FROM items WHERE item_id = $1", ITEM_COLUMNS);
        sqlx::query_as::<_, ItemRow>(&sql)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Item", item_id))
    }

    /// Lists all items, newest first
    pub async fn list_all(&self) -> Result<Vec<ItemRow>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM items ORDER BY created_at DESC, item_id DESC",
            ITEM_COLUMNS
        );
        Ok(sqlx::query_as::<_, ItemRow>(&sql).fetch_all(&self.pool).await?)
    }

    /// Lists items in one status, newest first
    pub async fn list_by_status(&self, status: ItemStatus) -> Result<Vec<ItemRow>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM items WHERE status = $1 ORDER BY created_at DESC, item_id DESC",
            ITEM_COLUMNS
        );
        Ok(sqlx::query_as::<_, ItemRow>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await?)
    }

    /// Inserts a new item including its initial status and claim columns
    pub async fn insert(&self, item: &ItemRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO items (
                item_id, title, description, item_type, category, location, item_date,
                status, image_url, reported_by, contact_method, is_high_value, is_anonymous,
                claimed_by, claim_description, claim_contact_info, claim_proof_details,
                claimed_at, created_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19
            )
            "#,
        )
        .bind(item.item_id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.item_type)
        .bind(&item.category)
        .bind(&item.location)
        .bind(item.item_date)
        .bind(item.status)
        .bind(&item.image_url)
        .bind(item.reported_by)
        .bind(&item.contact_method)
        .bind(item.is_high_value)
        .bind(item.is_anonymous)
        .bind(item.claimed_by)
        .bind(&item.claim_description)
        .bind(&item.claim_contact_info)
        .bind(&item.claim_proof_details)
        .bind(item.claimed_at)
        .bind(item.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DatabaseError::from(e) {
            DatabaseError::DuplicateEntry(_) => DatabaseError::duplicate("Item", "id", item.item_id),
            other => other,
        })?;
        Ok(())
    }

    /// Updates the descriptive columns of an item
    pub async fn update_details(&self, details: &ItemDetailsRow) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET title = $2, description = $3, category = $4, location = $5, item_date = $6
            WHERE item_id = $1
            "#,
        )
        .bind(details.item_id)
        .bind(&details.title)
        .bind(&details.description)
        .bind(&details.category)
        .bind(&details.location)
        .bind(details.item_date)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Item", details.item_id));
        }
        Ok(())
    }

    /// Writes the status and claim columns if the row still matches the guard
    ///
    /// This is a single conditional `UPDATE`, so at most one of several
    /// concurrent writers holding the same guard can succeed.
    ///
    /// # Returns
    ///
    /// Whether a row was updated
    pub async fn update_claim_slot(&self, write: &ClaimSlotWrite) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET status = $2,
                claimed_by = $3,
                claim_description = $4,
                claim_contact_info = $5,
                claim_proof_details = $6,
                claimed_at = $7
            WHERE item_id = $1
              AND status = $8
              AND ($9::uuid IS NULL OR claimed_by = $9)
            "#,
        )
        .bind(write.item_id)
        .bind(write.status)
        .bind(write.claimed_by)
        .bind(&write.claim_description)
        .bind(&write.claim_contact_info)
        .bind(&write.claim_proof_details)
        .bind(write.claimed_at)
        .bind(write.expected_status)
        .bind(write.expected_claimant)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Deletes an item; its comments go with it
    pub async fn delete(&self, item_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM items WHERE item_id = $1")
            .bind(item_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Item", item_id));
        }
        Ok(())
    }

    /// Comments of the given items, oldest first
    pub async fn comments_for(&self, item_ids: &[Uuid]) -> Result<Vec<CommentRow>, DatabaseError> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT comment_id, item_id, author_id, text, created_at
            FROM item_comments
            WHERE item_id = ANY($1)
            ORDER BY created_at, comment_id
            "#,
        )
        .bind(item_ids)
        .fetch_all(&self.pool)
        .await?)
    }

    /// Appends a comment to an existing item
    pub async fn insert_comment(&self, comment: &CommentRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO item_comments (comment_id, item_id, author_id, text, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.comment_id)
        .bind(comment.item_id)
        .bind(comment.author_id)
        .bind(&comment.text)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DatabaseError::from(e) {
            DatabaseError::ForeignKeyViolation(_) => DatabaseError::not_found("Item", comment.item_id),
            other => other,
        })?;
        Ok(())
    }
}

/// Item type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "item_type", rename_all = "lowercase")]
pub enum ItemType {
    Lost,
    Found,
}

/// Item status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "item_status", rename_all = "lowercase")]
pub enum ItemStatus {
    Pending,
    Claimed,
    Resolved,
    Rejected,
}

/// Database row for item
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ItemRow {
    pub item_id: Uuid,
    pub title: String,
    pub description: String,
    pub item_type: ItemType,
    pub category: String,
    pub location: String,
    pub item_date: DateTime<Utc>,
    pub status: ItemStatus,
    pub image_url: Option<String>,
    pub reported_by: Option<Uuid>,
    pub contact_method: Option<String>,
    pub is_high_value: bool,
    pub is_anonymous: bool,
    pub claimed_by: Option<Uuid>,
    pub claim_description: Option<String>,
    pub claim_contact_info: Option<String>,
    pub claim_proof_details: Option<String>,
    pub claimed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Editable descriptive columns
#[derive(Debug, Clone)]
pub struct ItemDetailsRow {
    pub item_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub item_date: DateTime<Utc>,
}

/// A guarded write of the status and claim columns
#[derive(Debug, Clone)]
pub struct ClaimSlotWrite {
    pub item_id: Uuid,
    pub status: ItemStatus,
    pub claimed_by: Option<Uuid>,
    pub claim_description: Option<String>,
    pub claim_contact_info: Option<String>,
    pub claim_proof_details: Option<String>,
    pub claimed_at: Option<DateTime<Utc>>,
    pub expected_status: ItemStatus,
    pub expected_claimant: Option<Uuid>,
}

/// Database row for item comment
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRow {
    pub comment_id: Uuid,
    pub item_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
