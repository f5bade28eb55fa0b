//! Item Domain Ports
//!
//! `ItemPort` is the Item Record Store. Besides plain reads and writes it
//! offers one conditional write, [`ItemPort::apply_transition`], which the
//! claim workflow uses for every status change:
//!
//! ```rust,ignore
//! let guard = item.guard();             // status/claimant as read
//! item.submit_claim(user, details, now)?;
//! if !items.apply_transition(&item, guard).await? {
//!     // someone else changed the item between our read and write
//! }
//! ```
//!
//! Two concurrent claims on the same pending item both pass validation, but
//! only one conditional write can still find `status = pending`.

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, ItemId, PortError};

use crate::comment::Comment;
use crate::item::{Item, ItemStatus, TransitionGuard};

/// The main port trait for item storage
#[async_trait]
pub trait ItemPort: DomainPort + HealthCheckable {
    /// Retrieves an item (with its comments) by ID
    ///
    /// # Returns
    ///
    /// The item if found, or `PortError::NotFound`
    async fn get_item(&self, id: ItemId) -> Result<Item, PortError>;

    /// Lists every item, newest first
    async fn list_items(&self) -> Result<Vec<Item>, PortError>;

    /// Lists items in the given status, newest first
    async fn list_by_status(&self, status: ItemStatus) -> Result<Vec<Item>, PortError>;

    /// Persists a newly reported item
    async fn create_item(&self, item: &Item) -> Result<(), PortError>;

    /// Persists the descriptive fields of an existing item
    ///
    /// Status and claim fields are never written by this call.
    async fn update_details(&self, item: &Item) -> Result<(), PortError>;

    /// Deletes an item and its comments
    async fn delete_item(&self, id: ItemId) -> Result<(), PortError>;

    /// Appends a comment to an item
    async fn add_comment(&self, id: ItemId, comment: &Comment) -> Result<(), PortError>;

    /// Writes `next`'s status and claim fields if the stored item still matches `guard`
    ///
    /// # Returns
    ///
    /// `true` if exactly one record was updated, `false` if the item is gone
    /// or no longer in the guarded state. No partial write happens either way.
    async fn apply_transition(&self, next: &Item, guard: TransitionGuard) -> Result<bool, PortError>;
}

/// Extension trait for ItemPort with convenience methods
#[async_trait]
pub trait ItemPortExt: ItemPort {
    /// Looks up an item, mapping `NotFound` to `None`
    async fn find_item(&self, id: ItemId) -> Result<Option<Item>, PortError> {
        match self.get_item(id).await {
            Ok(item) => Ok(Some(item)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

// Blanket implementation for all ItemPort implementors
impl<T: ItemPort + ?Sized> ItemPortExt for T {}

/// Mock implementation of ItemPort for testing
///
/// Stores items in memory. `apply_transition` is a compare-and-set under the
/// write lock, matching the single-statement conditional update of the
/// PostgreSQL adapter.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::RwLock;
    use core_kernel::HealthCheckResult;

    /// In-memory mock implementation of ItemPort
    #[derive(Debug, Default)]
    pub struct MockItemPort {
        items: Arc<RwLock<HashMap<ItemId, Item>>>,
        fail_writes: AtomicBool,
        transition_writes: AtomicUsize,
    }

    impl MockItemPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with items for testing
        pub async fn with_items(items: Vec<Item>) -> Self {
            let port = Self::new();
            for item in items {
                port.insert(item).await;
            }
            port
        }

        /// Stores an item as-is, bypassing validation
        pub async fn insert(&self, item: Item) {
            self.items.write().await.insert(item.id, item);
        }

        /// Returns the stored copy of an item
        pub async fn snapshot(&self, id: ItemId) -> Option<Item> {
            self.items.read().await.get(&id).cloned()
        }

        /// Makes every subsequent write fail with a connection error
        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        /// Number of conditional writes that matched and were applied
        pub fn transition_writes(&self) -> usize {
            self.transition_writes.load(Ordering::SeqCst)
        }

        fn check_writable(&self) -> Result<(), PortError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(PortError::connection("item store unavailable"));
            }
            Ok(())
        }
    }

    fn newest_first(mut items: Vec<Item>) -> Vec<Item> {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        items
    }

    impl DomainPort for MockItemPort {}

    #[async_trait]
    impl HealthCheckable for MockItemPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-item-port")
        }
    }

    #[async_trait]
    impl ItemPort for MockItemPort {
        async fn get_item(&self, id: ItemId) -> Result<Item, PortError> {
            self.items
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Item", id))
        }

        async fn list_items(&self) -> Result<Vec<Item>, PortError> {
            let items = self.items.read().await.values().cloned().collect();
            Ok(newest_first(items))
        }

        async fn list_by_status(&self, status: ItemStatus) -> Result<Vec<Item>, PortError> {
            let items = self
                .items
                .read()
                .await
                .values()
                .filter(|i| i.status == status)
                .cloned()
                .collect();
            Ok(newest_first(items))
        }

        async fn create_item(&self, item: &Item) -> Result<(), PortError> {
            self.check_writable()?;
            let mut items = self.items.write().await;
            if items.contains_key(&item.id) {
                return Err(PortError::conflict(format!("Item {} already exists", item.id)));
            }
            items.insert(item.id, item.clone());
            Ok(())
        }

        async fn update_details(&self, item: &Item) -> Result<(), PortError> {
            self.check_writable()?;
            let mut items = self.items.write().await;
            let stored = items
                .get_mut(&item.id)
                .ok_or_else(|| PortError::not_found("Item", item.id))?;
            stored.title = item.title.clone();
            stored.description = item.description.clone();
            stored.category = item.category.clone();
            stored.location = item.location.clone();
            stored.date = item.date;
            Ok(())
        }

        async fn delete_item(&self, id: ItemId) -> Result<(), PortError> {
            self.check_writable()?;
            self.items
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Item", id))
        }

        async fn add_comment(&self, id: ItemId, comment: &Comment) -> Result<(), PortError> {
            self.check_writable()?;
            let mut items = self.items.write().await;
            let stored = items
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Item", id))?;
            stored.comments.push(comment.clone());
            Ok(())
        }

        async fn apply_transition(&self, next: &Item, guard: TransitionGuard) -> Result<bool, PortError> {
            self.check_writable()?;
            let mut items = self.items.write().await;
            let Some(stored) = items.get_mut(&next.id) else {
                return Ok(false);
            };
            if stored.status != guard.status
                || (guard.claimant.is_some() && stored.claimant() != guard.claimant)
            {
                return Ok(false);
            }
            stored.status = next.status;
            stored.claim = next.claim.clone();
            self.transition_writes.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::MockItemPort;
    use crate::item::{ClaimDetails, ItemType, NewItem};
    use chrono::Utc;
    use core_kernel::UserId;

    fn item() -> Item {
        Item::report(
            NewItem {
                title: "Calculator".to_string(),
                description: "TI-84, name scratched off".to_string(),
                item_type: ItemType::Found,
                category: "Electronics".to_string(),
                location: "Room 101".to_string(),
                date: Utc::now(),
                image_url: None,
                contact_method: None,
                is_high_value: false,
                is_anonymous: false,
            },
            Some(UserId::new()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_conditional_write_applies_once() {
        let original = item();
        let port = MockItemPort::with_items(vec![original.clone()]).await;

        let mut first = original.clone();
        let guard = first.guard();
        first.submit_claim(UserId::new(), ClaimDetails::default(), Utc::now()).unwrap();
        assert!(port.apply_transition(&first, guard).await.unwrap());

        let mut second = original.clone();
        second.submit_claim(UserId::new(), ClaimDetails::default(), Utc::now()).unwrap();
        assert!(!port.apply_transition(&second, guard).await.unwrap());

        let stored = port.get_item(original.id).await.unwrap();
        assert_eq!(stored.claimant(), first.claimant());
        assert_eq!(port.transition_writes(), 1);
    }

    #[tokio::test]
    async fn test_conditional_write_on_missing_item() {
        let port = MockItemPort::new();
        let i = item();
        assert!(!port.apply_transition(&i, i.guard()).await.unwrap());
    }

    #[tokio::test]
    async fn test_transition_keeps_comments_added_meanwhile() {
        let original = item();
        let port = MockItemPort::with_items(vec![original.clone()]).await;
        let comment = Comment::new(UserId::new(), "Is it blue?").unwrap();
        port.add_comment(original.id, &comment).await.unwrap();

        let mut next = original.clone();
        let guard = next.guard();
        next.submit_claim(UserId::new(), ClaimDetails::default(), Utc::now()).unwrap();
        assert!(port.apply_transition(&next, guard).await.unwrap());

        assert_eq!(port.get_item(original.id).await.unwrap().comments, vec![comment]);
    }

    #[tokio::test]
    async fn test_find_item_maps_not_found() {
        let port = MockItemPort::new();
        assert!(port.find_item(ItemId::new()).await.unwrap().is_none());
    }
}
