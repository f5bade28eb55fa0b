//! Test Data Builders
//!
//! Builds items directly in any lifecycle state, bypassing the transition
//! methods, so tests can start from states (including the reserved
//! `rejected`) that would otherwise need a sequence of calls to reach.

use chrono::{DateTime, Utc};

use core_kernel::UserId;
use domain_items::{ActiveClaim, ClaimDetails, Item, ItemStatus, NewItem};

use crate::fixtures::{ClaimFixtures, ItemFixtures, TemporalFixtures};

/// Builder for items
pub struct TestItemBuilder {
    new: NewItem,
    reporter: Option<UserId>,
    status: ItemStatus,
    claim: Option<ActiveClaim>,
}

impl Default for TestItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestItemBuilder {
    /// A pending lost backpack with no reporter
    pub fn new() -> Self {
        Self {
            new: ItemFixtures::lost_backpack(),
            reporter: None,
            status: ItemStatus::Pending,
            claim: None,
        }
    }

    /// Starts from a different report
    pub fn from_report(new: NewItem) -> Self {
        Self {
            new,
            ..Self::new()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.new.title = title.into();
        self
    }

    pub fn reported_by(mut self, reporter: UserId) -> Self {
        self.reporter = Some(reporter);
        self.new.is_anonymous = false;
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.reporter = None;
        self.new.is_anonymous = true;
        self
    }

    /// Puts the item in `claimed` with an active claim by `claimant`
    pub fn claimed_by(self, claimant: UserId) -> Self {
        self.claimed_with(claimant, ClaimFixtures::details(), TemporalFixtures::claimed_at())
    }

    pub fn claimed_with(mut self, claimant: UserId, details: ClaimDetails, at: DateTime<Utc>) -> Self {
        self.status = ItemStatus::Claimed;
        self.claim = Some(ActiveClaim {
            claimant,
            details,
            claimed_at: at,
        });
        self
    }

    /// Puts the item in `resolved`, keeping the approved claim
    pub fn resolved_for(self, claimant: UserId) -> Self {
        let mut builder = self.claimed_by(claimant);
        builder.status = ItemStatus::Resolved;
        builder
    }

    /// Puts the item in the reserved `rejected` status
    pub fn rejected(mut self) -> Self {
        self.status = ItemStatus::Rejected;
        self.claim = None;
        self
    }

    pub fn build(self) -> Item {
        let mut item = Item::report(self.new, self.reporter).unwrap();
        item.status = self.status;
        item.claim = self.claim;
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_states_hold_claim_invariant() {
        let claimant = UserId::new();
        let items = [
            TestItemBuilder::new().build(),
            TestItemBuilder::new().claimed_by(claimant).build(),
            TestItemBuilder::new().resolved_for(claimant).build(),
            TestItemBuilder::new().rejected().build(),
        ];
        for item in &items {
            assert!(item.claim_invariant_holds(), "{:?}", item.status);
        }
        assert_eq!(items[1].claimant(), Some(claimant));
    }

    #[test]
    fn test_anonymous_item_has_no_reporter() {
        let item = TestItemBuilder::new().reported_by(UserId::new()).anonymous().build();
        assert!(item.reporter.is_none());
        assert!(item.is_anonymous);
    }
}
