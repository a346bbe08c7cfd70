//! ScheduledPost entity <-> model mapper

use social_core::entities::ScheduledPost;
use social_core::value_objects::Snowflake;

use crate::models::ScheduledPostModel;

/// Convert ScheduledPostModel to ScheduledPost entity
impl From<ScheduledPostModel> for ScheduledPost {
    fn from(model: ScheduledPostModel) -> Self {
        ScheduledPost {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            title: model.title,
            content: model.content,
            image: model.image,
            tag_ids: model.tag_ids.into_iter().map(Snowflake::new).collect(),
            publish_at: model.publish_at,
            fired_at: model.fired_at,
            created_at: model.created_at,
        }
    }
}

/// Convert ScheduledPost entity reference to values for database insertion
pub struct ScheduledPostInsert<'a> {
    pub id: i64,
    pub author_id: i64,
    pub title: &'a str,
    pub content: &'a str,
    pub image: Option<&'a str>,
    pub tag_ids: Vec<i64>,
    pub publish_at: chrono::DateTime<chrono::Utc>,
}

impl<'a> ScheduledPostInsert<'a> {
    pub fn new(job: &'a ScheduledPost) -> Self {
        Self {
            id: job.id.into_inner(),
            author_id: job.author_id.into_inner(),
            title: &job.title,
            content: &job.content,
            image: job.image.as_deref(),
            tag_ids: job.tag_ids.iter().map(|t| t.into_inner()).collect(),
            publish_at: job.publish_at,
        }
    }
}
