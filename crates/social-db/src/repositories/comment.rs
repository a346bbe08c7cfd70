//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::Comment;
use social_core::traits::{CommentRepository, RepoResult};
use social_core::value_objects::Snowflake;

use crate::mappers::CommentInsert;
use crate::models::CommentModel;

use super::error::map_db_error;

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let insert = CommentInsert::new(comment);

        sqlx::query(
            r"
            INSERT INTO comments (id, post_id, author_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(insert.id)
        .bind(insert.post_id)
        .bind(insert.author_id)
        .bind(insert.content)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let results = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, post_id, author_id, content, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }
}
