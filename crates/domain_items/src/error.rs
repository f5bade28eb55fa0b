//! Item domain errors

use thiserror::Error;

use crate::item::ItemStatus;

/// Errors raised when an item transition's preconditions do not hold
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("Item is already {status}")]
    NotClaimable { status: ItemStatus },

    #[error("You cannot claim an item that you reported")]
    OwnItem,

    #[error("Item is not currently claimed")]
    NotClaimed { status: ItemStatus },

    #[error("Not authorized to cancel this claim")]
    NotClaimant,

    #[error("Item is not in a 'claimed' state (current status: {status})")]
    NotUnderReview { status: ItemStatus },

    #[error("Pickup location is required for approval")]
    PickupLocationRequired,
}

impl ItemError {
    /// True for errors caused by who is asking rather than what state the item is in
    pub fn is_authorization(&self) -> bool {
        matches!(self, ItemError::OwnItem | ItemError::NotClaimant)
    }

    /// The status the item was in when the transition was refused, if relevant
    pub fn current_status(&self) -> Option<ItemStatus> {
        match self {
            ItemError::NotClaimable { status }
            | ItemError::NotClaimed { status }
            | ItemError::NotUnderReview { status } => Some(*status),
            _ => None,
        }
    }
}
