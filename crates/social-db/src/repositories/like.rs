//! PostgreSQL implementation of LikeRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::traits::{LikeRepository, RepoResult};
use social_core::value_objects::Snowflake;

use crate::models::LikeCountModel;

use super::error::map_db_error;

/// PostgreSQL implementation of LikeRepository
#[derive(Clone)]
pub struct PgLikeRepository {
    pool: PgPool,
}

impl PgLikeRepository {
    /// Create a new PgLikeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    #[instrument(skip(self))]
    async fn add(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO post_likes (post_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (post_id, user_id) DO NOTHING
            ",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn remove(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2
            ",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count_for_posts(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, i64)>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = post_ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, LikeCountModel>(
            r"
            SELECT post_id, COUNT(*) as count
            FROM post_likes
            WHERE post_id = ANY($1)
            GROUP BY post_id
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results
            .into_iter()
            .map(|r| (Snowflake::new(r.post_id), r.count))
            .collect())
    }
}
