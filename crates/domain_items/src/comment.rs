//! Item comments

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CommentId, CoreError, UserId};

/// Longest comment body accepted
pub const MAX_COMMENT_LEN: usize = 2000;

/// A comment on an item, independent of the item's claim state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub author: UserId,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment, trimming the text
    pub fn new(author: UserId, text: &str) -> Result<Self, CoreError> {
        let text = text.trim();
        CoreError::require_non_blank("text", text)?;
        if text.chars().count() > MAX_COMMENT_LEN {
            return Err(CoreError::validation(format!(
                "text must be at most {} characters",
                MAX_COMMENT_LEN
            )));
        }
        Ok(Self {
            id: CommentId::new_v7(),
            text: text.to_string(),
            author,
            created_at: Utc::now(),
        })
    }
}
