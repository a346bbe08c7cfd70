//! Tag entity <-> model mapper

use social_core::entities::Tag;
use social_core::value_objects::Snowflake;

use crate::models::{PostTagModel, TagModel};

/// Convert TagModel to Tag entity
impl From<TagModel> for Tag {
    fn from(model: TagModel) -> Self {
        Tag {
            id: Snowflake::new(model.id),
            name: model.name,
        }
    }
}

impl PostTagModel {
    /// Split a joined post_tags row into its (post id, tag) pair
    pub fn into_pair(self) -> (Snowflake, Tag) {
        (
            Snowflake::new(self.post_id),
            Tag {
                id: Snowflake::new(self.id),
                name: self.name,
            },
        )
    }
}
