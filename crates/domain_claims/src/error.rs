//! Claim workflow errors
//!
//! Precondition failures are distinguished by kind so callers can render
//! distinct responses. `Internal` covers store failures; its message is
//! for logs only.

use thiserror::Error;

use core_kernel::{CoreError, PortError};
use domain_items::{ItemError, ItemStatus};

/// Errors returned by the claim lifecycle and admin review services
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    /// The operation is not valid for the item's current status
    #[error("{message}")]
    InvalidState {
        message: String,
        status: Option<ItemStatus>,
    },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClaimError {
    pub fn item_not_found() -> Self {
        ClaimError::NotFound("Item not found".to_string())
    }

    pub fn not_authorized() -> Self {
        ClaimError::Forbidden("Not authorized".to_string())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ClaimError::InvalidArgument(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ClaimError::Internal(message.into())
    }

    /// The item status echoed by an `InvalidState` error
    pub fn status(&self) -> Option<ItemStatus> {
        match self {
            ClaimError::InvalidState { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<ItemError> for ClaimError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::OwnItem | ItemError::NotClaimant => ClaimError::Forbidden(err.to_string()),
            ItemError::PickupLocationRequired => ClaimError::InvalidArgument(err.to_string()),
            ItemError::NotClaimable { status }
            | ItemError::NotClaimed { status }
            | ItemError::NotUnderReview { status } => ClaimError::InvalidState {
                message: err.to_string(),
                status: Some(status),
            },
        }
    }
}

impl From<PortError> for ClaimError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, .. } => {
                ClaimError::NotFound(format!("{} not found", entity_type))
            }
            PortError::Validation { message, .. } => ClaimError::InvalidArgument(message),
            PortError::Conflict { message } => ClaimError::InvalidState { message, status: None },
            other => ClaimError::Internal(other.to_string()),
        }
    }
}

impl From<CoreError> for ClaimError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(message) | CoreError::InvalidIdentifier(message) => {
                ClaimError::InvalidArgument(message)
            }
            CoreError::NotFound(message) => ClaimError::NotFound(message),
            CoreError::Configuration(message) => ClaimError::Internal(message),
        }
    }
}
