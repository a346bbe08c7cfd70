//! PostgreSQL implementation of ScheduledPostRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::ScheduledPost;
use social_core::traits::{RepoResult, ScheduledPostRepository};

use crate::mappers::ScheduledPostInsert;
use crate::models::ScheduledPostModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ScheduledPostRepository
#[derive(Clone)]
pub struct PgScheduledPostRepository {
    pool: PgPool,
}

impl PgScheduledPostRepository {
    /// Create a new PgScheduledPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduledPostRepository for PgScheduledPostRepository {
    #[instrument(skip(self))]
    async fn create(&self, job: &ScheduledPost) -> RepoResult<()> {
        let insert = ScheduledPostInsert::new(job);

        sqlx::query(
            r"
            INSERT INTO scheduled_posts (id, author_id, title, content, image, tag_ids,
                                         publish_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(insert.id)
        .bind(insert.author_id)
        .bind(insert.title)
        .bind(insert.content)
        .bind(insert.image)
        .bind(&insert.tag_ids)
        .bind(insert.publish_at)
        .bind(job.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn claim_due(&self, now: DateTime<Utc>) -> RepoResult<Vec<ScheduledPost>> {
        // Single-statement claim: flipping fired_at and returning the rows
        // in one UPDATE means two pollers can never both receive a job.
        let results = sqlx::query_as::<_, ScheduledPostModel>(
            r"
            UPDATE scheduled_posts
            SET fired_at = $1
            WHERE fired_at IS NULL AND publish_at <= $1
            RETURNING id, author_id, title, content, image, tag_ids,
                      publish_at, fired_at, created_at
            ",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ScheduledPost::from).collect())
    }
}
