//! Scheduled post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for scheduled_posts table
#[derive(Debug, Clone, FromRow)]
pub struct ScheduledPostModel {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub tag_ids: Vec<i64>,
    pub publish_at: DateTime<Utc>,
    pub fired_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
