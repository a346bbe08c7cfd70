//! Post database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Aggregated like count per post
#[derive(Debug, Clone, FromRow)]
pub struct LikeCountModel {
    pub post_id: i64,
    pub count: i64,
}
