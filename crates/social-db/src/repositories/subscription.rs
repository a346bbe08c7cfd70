//! PostgreSQL implementation of SubscriptionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::traits::{RepoResult, SubscriptionRepository};
use social_core::value_objects::Snowflake;

use super::error::map_db_error;

/// PostgreSQL implementation of SubscriptionRepository
#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    /// Create a new PgSubscriptionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    #[instrument(skip(self))]
    async fn add(&self, follower_id: Snowflake, followee_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO subscriptions (follower_id, followee_id)
            VALUES ($1, $2)
            ON CONFLICT (follower_id, followee_id) DO NOTHING
            ",
        )
        .bind(follower_id.into_inner())
        .bind(followee_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn remove(&self, follower_id: Snowflake, followee_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM subscriptions WHERE follower_id = $1 AND followee_id = $2
            ",
        )
        .bind(follower_id.into_inner())
        .bind(followee_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn followee_ids(&self, follower_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let results = sqlx::query_scalar::<_, i64>(
            r"
            SELECT followee_id FROM subscriptions WHERE follower_id = $1 ORDER BY created_at
            ",
        )
        .bind(follower_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Snowflake::new).collect())
    }
}
