//! Post entity - a published piece of content

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new Post published now
    pub fn new(id: Snowflake, author_id: Snowflake, title: String, content: String) -> Self {
        Self {
            id,
            author_id,
            title,
            content,
            image: None,
            created_at: Utc::now(),
        }
    }

    /// Create a Post with an explicit publication instant
    ///
    /// Used when a deferred job fires: the post carries the trigger
    /// instant, not the moment the worker ran.
    pub fn published_at(
        id: Snowflake,
        author_id: Snowflake,
        title: String,
        content: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author_id,
            title,
            content,
            image: None,
            created_at,
        }
    }

    /// Check whether the given user wrote this post
    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Update the image path
    pub fn set_image(&mut self, image: Option<String>) {
        self.image = image;
    }

    /// Check if post content is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Like row: `user` liked `post`
///
/// The pair is unique; liking twice is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Like {
    /// Create a new Like
    pub fn new(post_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            post_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}
