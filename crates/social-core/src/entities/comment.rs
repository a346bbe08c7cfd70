//! Comment entity - an immutable remark on a post

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Comment entity
///
/// Comments cannot be edited or deleted; they disappear only when their
/// post (or author) is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new Comment
    pub fn new(id: Snowflake, post_id: Snowflake, author_id: Snowflake, content: String) -> Self {
        Self {
            id,
            post_id,
            author_id,
            content,
            created_at: Utc::now(),
        }
    }

    /// Check if comment content is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}
