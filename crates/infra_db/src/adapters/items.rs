//! PostgreSQL Item Adapter
//!
//! Implements `ItemPort` on top of `ItemRepository`. The claim slot is
//! spread over the `claimed_*`/`claim_*` columns; `row_to_item` folds them
//! back into `Option<ActiveClaim>` and `claim_slot_write` flattens them for
//! the conditional update.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{
    CommentId, DomainPort, HealthCheckResult, HealthCheckable, ItemId, PortError, UserId,
};
use domain_items::{
    ActiveClaim, ClaimDetails, Comment, Item, ItemPort, ItemStatus, ItemType, TransitionGuard,
};

use crate::repositories::items::{
    ClaimSlotWrite, CommentRow, ItemDetailsRow, ItemRepository, ItemRow,
    ItemStatus as DbItemStatus, ItemType as DbItemType,
};

use super::{db_to_port_error, ping};

/// PostgreSQL-backed implementation of the ItemPort trait
#[derive(Debug, Clone)]
pub struct PostgresItemAdapter {
    repository: ItemRepository,
    pool: PgPool,
}

impl PostgresItemAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ItemRepository::new(pool.clone()),
            pool,
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &ItemRepository {
        &self.repository
    }

    async fn with_comments(&self, rows: Vec<ItemRow>) -> Result<Vec<Item>, PortError> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.item_id).collect();
        let mut comments: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for row in self.repository.comments_for(&ids).await.map_err(db_to_port_error)? {
            comments.entry(row.item_id).or_default().push(row_to_comment(row));
        }
        Ok(rows
            .into_iter()
            .map(|row| {
                let thread = comments.remove(&row.item_id).unwrap_or_default();
                row_to_item(row, thread)
            })
            .collect())
    }
}

// Mark as a domain port
impl DomainPort for PostgresItemAdapter {}

#[async_trait]
impl HealthCheckable for PostgresItemAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-item-adapter").await
    }
}

#[async_trait]
impl ItemPort for PostgresItemAdapter {
    #[instrument(skip(self), fields(item_id = %id))]
    async fn get_item(&self, id: ItemId) -> Result<Item, PortError> {
        debug!("Fetching item by ID");
        let row = self
            .repository
            .get_by_id(id.into())
            .await
            .map_err(db_to_port_error)?;
        let mut items = self.with_comments(vec![row]).await?;
        items.pop().ok_or_else(|| PortError::not_found("Item", id))
    }

    #[instrument(skip(self))]
    async fn list_items(&self) -> Result<Vec<Item>, PortError> {
        let rows = self.repository.list_all().await.map_err(db_to_port_error)?;
        debug!(count = rows.len(), "Listed items");
        self.with_comments(rows).await
    }

    #[instrument(skip(self))]
    async fn list_by_status(&self, status: ItemStatus) -> Result<Vec<Item>, PortError> {
        let rows = self
            .repository
            .list_by_status(status_to_db(status))
            .await
            .map_err(db_to_port_error)?;
        self.with_comments(rows).await
    }

    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn create_item(&self, item: &Item) -> Result<(), PortError> {
        self.repository
            .insert(&item_to_row(item))
            .await
            .map_err(db_to_port_error)?;
        for comment in &item.comments {
            self.add_comment(item.id, comment).await?;
        }
        debug!("Item created");
        Ok(())
    }

    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn update_details(&self, item: &Item) -> Result<(), PortError> {
        self.repository
            .update_details(&ItemDetailsRow {
                item_id: item.id.into(),
                title: item.title.clone(),
                description: item.description.clone(),
                category: item.category.clone(),
                location: item.location.clone(),
                item_date: item.date,
            })
            .await
            .map_err(db_to_port_error)
    }

    #[instrument(skip(self), fields(item_id = %id))]
    async fn delete_item(&self, id: ItemId) -> Result<(), PortError> {
        self.repository.delete(id.into()).await.map_err(db_to_port_error)
    }

    #[instrument(skip(self, comment), fields(item_id = %id))]
    async fn add_comment(&self, id: ItemId, comment: &Comment) -> Result<(), PortError> {
        self.repository
            .insert_comment(&CommentRow {
                comment_id: comment.id.into(),
                item_id: id.into(),
                author_id: comment.author.into(),
                text: comment.text.clone(),
                created_at: comment.created_at,
            })
            .await
            .map_err(db_to_port_error)
    }

    #[instrument(skip(self, next), fields(item_id = %next.id, from = %guard.status, to = %next.status))]
    async fn apply_transition(&self, next: &Item, guard: TransitionGuard) -> Result<bool, PortError> {
        let applied = self
            .repository
            .update_claim_slot(&claim_slot_write(next, guard))
            .await
            .map_err(db_to_port_error)?;
        debug!(applied, "Conditional claim-slot update");
        Ok(applied)
    }
}

fn type_to_db(t: ItemType) -> DbItemType {
    match t {
        ItemType::Lost => DbItemType::Lost,
        ItemType::Found => DbItemType::Found,
    }
}

fn db_to_type(t: DbItemType) -> ItemType {
    match t {
        DbItemType::Lost => ItemType::Lost,
        DbItemType::Found => ItemType::Found,
    }
}

fn status_to_db(s: ItemStatus) -> DbItemStatus {
    match s {
        ItemStatus::Pending => DbItemStatus::Pending,
        ItemStatus::Claimed => DbItemStatus::Claimed,
        ItemStatus::Resolved => DbItemStatus::Resolved,
        ItemStatus::Rejected => DbItemStatus::Rejected,
    }
}

fn db_to_status(s: DbItemStatus) -> ItemStatus {
    match s {
        DbItemStatus::Pending => ItemStatus::Pending,
        DbItemStatus::Claimed => ItemStatus::Claimed,
        DbItemStatus::Resolved => ItemStatus::Resolved,
        DbItemStatus::Rejected => ItemStatus::Rejected,
    }
}

/// Flattens `next`'s claim slot into a guarded update
fn claim_slot_write(next: &Item, guard: TransitionGuard) -> ClaimSlotWrite {
    let claim = next.claim.as_ref();
    ClaimSlotWrite {
        item_id: next.id.into(),
        status: status_to_db(next.status),
        claimed_by: claim.map(|c| c.claimant.into()),
        claim_description: claim.map(|c| c.details.description.clone()),
        claim_contact_info: claim.map(|c| c.details.contact_info.clone()),
        claim_proof_details: claim.map(|c| c.details.proof_details.clone()),
        claimed_at: claim.map(|c| c.claimed_at),
        expected_status: status_to_db(guard.status),
        expected_claimant: guard.claimant.map(Into::into),
    }
}

fn item_to_row(item: &Item) -> ItemRow {
    let claim = item.claim.as_ref();
    ItemRow {
        item_id: item.id.into(),
        title: item.title.clone(),
        description: item.description.clone(),
        item_type: type_to_db(item.item_type),
        category: item.category.clone(),
        location: item.location.clone(),
        item_date: item.date,
        status: status_to_db(item.status),
        image_url: item.image_url.clone(),
        reported_by: item.reporter.map(Into::into),
        contact_method: item.contact_method.clone(),
        is_high_value: item.is_high_value,
        is_anonymous: item.is_anonymous,
        claimed_by: claim.map(|c| c.claimant.into()),
        claim_description: claim.map(|c| c.details.description.clone()),
        claim_contact_info: claim.map(|c| c.details.contact_info.clone()),
        claim_proof_details: claim.map(|c| c.details.proof_details.clone()),
        claimed_at: claim.map(|c| c.claimed_at),
        created_at: item.created_at,
    }
}

fn row_to_item(row: ItemRow, comments: Vec<Comment>) -> Item {
    let claim = match (row.claimed_by, row.claimed_at) {
        (Some(claimant), Some(claimed_at)) => Some(ActiveClaim {
            claimant: UserId::from(claimant),
            details: ClaimDetails {
                description: row.claim_description.unwrap_or_default(),
                contact_info: row.claim_contact_info.unwrap_or_default(),
                proof_details: row.claim_proof_details.unwrap_or_default(),
            },
            claimed_at,
        }),
        _ => None,
    };

    Item {
        id: ItemId::from(row.item_id),
        title: row.title,
        description: row.description,
        item_type: db_to_type(row.item_type),
        category: row.category,
        location: row.location,
        date: row.item_date,
        status: db_to_status(row.status),
        image_url: row.image_url,
        reporter: row.reported_by.map(UserId::from),
        contact_method: row.contact_method,
        is_high_value: row.is_high_value,
        is_anonymous: row.is_anonymous,
        claim,
        comments,
        created_at: row.created_at,
    }
}

fn row_to_comment(row: CommentRow) -> Comment {
    Comment {
        id: CommentId::from(row.comment_id),
        text: row.text,
        author: UserId::from(row.author_id),
        created_at: row.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain_items::NewItem;

    fn claimed_item() -> Item {
        let mut item = Item::report(
            NewItem {
                title: "Student ID".to_string(),
                description: "Card with photo".to_string(),
                item_type: ItemType::Found,
                category: "Documents".to_string(),
                location: "Library".to_string(),
                date: Utc::now(),
                image_url: Some("https://img.example/id.png".to_string()),
                contact_method: None,
                is_high_value: false,
                is_anonymous: false,
            },
            Some(UserId::new()),
        )
        .unwrap();
        item.submit_claim(
            UserId::new(),
            ClaimDetails {
                description: "It's mine".to_string(),
                contact_info: "x@campus.edu".to_string(),
                proof_details: "Same face".to_string(),
            },
            Utc::now(),
        )
        .unwrap();
        item
    }

    #[test]
    fn test_row_round_trip_keeps_claim() {
        let item = claimed_item();
        let back = row_to_item(item_to_row(&item), Vec::new());
        assert_eq!(back, item);
    }

    #[test]
    fn test_cleared_slot_writes_nulls() {
        let mut item = claimed_item();
        let guard = item.guard();
        item.reject_claim().unwrap();

        let write = claim_slot_write(&item, guard);

        assert_eq!(write.status, DbItemStatus::Pending);
        assert_eq!(write.expected_status, DbItemStatus::Claimed);
        assert!(write.expected_claimant.is_some());
        assert!(write.claimed_by.is_none());
        assert!(write.claimed_at.is_none());
    }

    #[test]
    fn test_partial_slot_reads_as_no_claim() {
        let mut row = item_to_row(&claimed_item());
        row.claimed_at = None;
        assert!(row_to_item(row, Vec::new()).claim.is_none());
    }
}
