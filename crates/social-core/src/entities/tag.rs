//! Tag entity - a canonical label attached to posts

use crate::value_objects::Snowflake;

/// Tag entity
///
/// Names are unique canonical slugs; tags are created on demand when a
/// post references an unknown name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: Snowflake,
    pub name: String,
}

impl Tag {
    /// Create a new Tag
    pub fn new(id: Snowflake, name: String) -> Self {
        Self { id, name }
    }
}
