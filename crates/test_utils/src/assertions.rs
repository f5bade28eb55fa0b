//! Custom Test Assertions
//!
//! Assertion helpers for items and notifications that print the relevant
//! state on failure.

use core_kernel::UserId;
use domain_claims::{ClaimError, Notification};
use domain_items::{Item, ItemStatus};

/// Asserts that an item's claim slot agrees with its status
pub fn assert_claim_slot_consistent(item: &Item) {
    assert!(
        item.claim_invariant_holds(),
        "Claim slot inconsistent with status {}: claim={:?}",
        item.status,
        item.claim
    );
}

/// Asserts that an item is open for claims with nothing left of the last claim
pub fn assert_reopened(item: &Item) {
    assert_eq!(item.status, ItemStatus::Pending, "Expected item to be pending again");
    assert!(item.claim.is_none(), "Expected claim to be cleared, got {:?}", item.claim);
}

/// Asserts that an item is claimed by `claimant`
pub fn assert_claimed_by(item: &Item, claimant: UserId) {
    assert_eq!(item.status, ItemStatus::Claimed, "Expected item to be claimed");
    assert_eq!(
        item.claimant(),
        Some(claimant),
        "Expected claimant {}, got {:?}",
        claimant,
        item.claimant()
    );
}

/// Asserts that a workflow call failed with `InvalidState` naming `status`
pub fn assert_invalid_state<T: std::fmt::Debug>(result: Result<T, ClaimError>, status: ItemStatus) {
    match result {
        Err(err @ ClaimError::InvalidState { .. }) => {
            assert_eq!(err.status(), Some(status), "Wrong status echoed in {:?}", err);
            assert!(
                err.to_string().contains(status.as_str()),
                "Message {:?} does not name status {}",
                err.to_string(),
                status
            );
        }
        other => panic!("Expected InvalidState({}), got {:?}", status, other),
    }
}

/// Asserts that a workflow call failed with `Forbidden`
pub fn assert_forbidden<T: std::fmt::Debug>(result: Result<T, ClaimError>) {
    assert!(
        matches!(result, Err(ClaimError::Forbidden(_))),
        "Expected Forbidden, got {:?}",
        result
    );
}

/// Asserts that exactly `count` of `notifications` mention `needle`
pub fn assert_mentions(notifications: &[Notification], needle: &str, count: usize) {
    let found = notifications.iter().filter(|n| n.message.contains(needle)).count();
    assert_eq!(
        found,
        count,
        "Expected {} notifications mentioning {:?}, got {}: {:#?}",
        count,
        needle,
        found,
        notifications.iter().map(|n| &n.message).collect::<Vec<_>>()
    );
}
