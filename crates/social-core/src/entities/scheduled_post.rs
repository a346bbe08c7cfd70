//! ScheduledPost entity - a one-shot deferred publication job

use chrono::{DateTime, Utc};

use crate::entities::Post;
use crate::value_objects::Snowflake;

/// Persisted publication job
///
/// All post parameters are captured by value at scheduling time. The row
/// doubles as the fired-job tombstone: `fired_at` flips exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledPost {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub tag_ids: Vec<Snowflake>,
    pub publish_at: DateTime<Utc>,
    pub fired_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ScheduledPost {
    /// Create a new job due at `publish_at`
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        title: String,
        content: String,
        publish_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author_id,
            title,
            content,
            image: None,
            tag_ids: Vec::new(),
            publish_at,
            fired_at: None,
            created_at: Utc::now(),
        }
    }

    /// Check whether the job is due and still unfired
    #[inline]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.fired_at.is_none() && self.publish_at <= now
    }

    /// Check whether the job has already fired
    #[inline]
    pub fn has_fired(&self) -> bool {
        self.fired_at.is_some()
    }

    /// Build the post this job publishes
    ///
    /// The post's `created_at` is the trigger instant, not the firing time.
    pub fn into_post(self, post_id: Snowflake) -> Post {
        let mut post = Post::published_at(
            post_id,
            self.author_id,
            self.title,
            self.content,
            self.publish_at,
        );
        post.set_image(self.image);
        post
    }
}
