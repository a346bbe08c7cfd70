//! PostgreSQL implementation of TagRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::Tag;
use social_core::traits::{RepoResult, TagRepository};
use social_core::value_objects::Snowflake;

use crate::models::{PostTagModel, TagModel};

use super::error::map_db_error;

/// PostgreSQL implementation of TagRepository
#[derive(Clone)]
pub struct PgTagRepository {
    pool: PgPool,
}

impl PgTagRepository {
    /// Create a new PgTagRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    #[instrument(skip(self))]
    async fn get_or_create(&self, candidate_id: Snowflake, name: &str) -> RepoResult<Tag> {
        // Concurrent callers race on the unique name; DO NOTHING plus the
        // follow-up select makes every caller converge on the winning row.
        let inserted = sqlx::query_as::<_, TagModel>(
            r"
            INSERT INTO tags (id, name)
            VALUES ($1, $2)
            ON CONFLICT (name) DO NOTHING
            RETURNING id, name
            ",
        )
        .bind(candidate_id.into_inner())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if let Some(model) = inserted {
            return Ok(Tag::from(model));
        }

        let existing = sqlx::query_as::<_, TagModel>(
            r"
            SELECT id, name FROM tags WHERE name = $1
            ",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Tag::from(existing))
    }

    #[instrument(skip(self))]
    async fn find_for_posts(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, Tag)>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = post_ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, PostTagModel>(
            r"
            SELECT pt.post_id, t.id, t.name
            FROM post_tags pt
            JOIN tags t ON t.id = pt.tag_id
            WHERE pt.post_id = ANY($1)
            ORDER BY t.name
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PostTagModel::into_pair).collect())
    }
}
