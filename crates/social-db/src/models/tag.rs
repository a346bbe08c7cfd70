//! Tag database models

use sqlx::FromRow;

/// Database model for tags table
#[derive(Debug, Clone, FromRow)]
pub struct TagModel {
    pub id: i64,
    pub name: String,
}

/// Tag joined through the post_tags link table
#[derive(Debug, Clone, FromRow)]
pub struct PostTagModel {
    pub post_id: i64,
    pub id: i64,
    pub name: String,
}
