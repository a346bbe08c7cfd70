//! Comment entity <-> model mapper

use social_core::entities::Comment;
use social_core::value_objects::Snowflake;

use crate::models::CommentModel;

/// Convert CommentModel to Comment entity
impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            created_at: model.created_at,
        }
    }
}

/// Convert Comment entity reference to values for database insertion
pub struct CommentInsert<'a> {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub content: &'a str,
}

impl<'a> CommentInsert<'a> {
    pub fn new(comment: &'a Comment) -> Self {
        Self {
            id: comment.id.into_inner(),
            post_id: comment.post_id.into_inner(),
            author_id: comment.author_id.into_inner(),
            content: &comment.content,
        }
    }
}
