//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use social_core::entities::Post;
use social_core::query::PostFilter;
use social_core::traits::{PostRepository, RepoResult};
use social_core::value_objects::Snowflake;

use crate::mappers::{PostInsert, PostUpdate};
use crate::models::PostModel;

use super::error::{map_db_error, post_not_found};

const POST_COLUMNS: &str = "id, author_id, title, content, image, created_at";

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, author_id, title, content, image, created_at
            FROM posts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &PostFilter, viewer_id: Snowflake) -> RepoResult<Vec<Post>> {
        // Predicates compose with AND; the tag list is a union inside one
        // predicate. EXISTS semijoins keep the result free of duplicates.
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE TRUE"
        ));

        if filter.mine {
            builder.push(" AND author_id = ");
            builder.push_bind(viewer_id.into_inner());
        }
        if filter.subscriptions {
            builder.push(
                " AND author_id IN (SELECT followee_id FROM subscriptions WHERE follower_id = ",
            );
            builder.push_bind(viewer_id.into_inner());
            builder.push(")");
        }
        if filter.liked {
            builder.push(
                " AND EXISTS (SELECT 1 FROM post_likes pl WHERE pl.post_id = posts.id AND pl.user_id = ",
            );
            builder.push_bind(viewer_id.into_inner());
            builder.push(")");
        }
        if let Some(tag_ids) = &filter.tag_ids {
            let ids: Vec<i64> = tag_ids.iter().map(|id| id.into_inner()).collect();
            builder.push(
                " AND EXISTS (SELECT 1 FROM post_tags pt WHERE pt.post_id = posts.id AND pt.tag_id = ANY(",
            );
            builder.push_bind(ids);
            builder.push("))");
        }
        builder.push(" ORDER BY title, id");

        let results = builder
            .build_query_as::<PostModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, post: &Post, tag_ids: &[Snowflake]) -> RepoResult<()> {
        let insert = PostInsert::new(post);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO posts (id, author_id, title, content, image, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(insert.id)
        .bind(insert.author_id)
        .bind(insert.title)
        .bind(insert.content)
        .bind(insert.image)
        .bind(post.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for tag_id in tag_ids {
            sqlx::query(
                r"
                INSERT INTO post_tags (post_id, tag_id)
                VALUES ($1, $2)
                ON CONFLICT (post_id, tag_id) DO NOTHING
                ",
            )
            .bind(insert.id)
            .bind(tag_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, post: &Post, tag_ids: Option<&[Snowflake]>) -> RepoResult<()> {
        let update = PostUpdate::new(post);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE posts
            SET title = $2, content = $3
            WHERE id = $1
            ",
        )
        .bind(update.id)
        .bind(update.title)
        .bind(update.content)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(post.id));
        }

        // A tag list of Some replaces the whole set; None leaves it alone
        if let Some(tag_ids) = tag_ids {
            sqlx::query(
                r"
                DELETE FROM post_tags WHERE post_id = $1
                ",
            )
            .bind(update.id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            for tag_id in tag_ids {
                sqlx::query(
                    r"
                    INSERT INTO post_tags (post_id, tag_id)
                    VALUES ($1, $2)
                    ON CONFLICT (post_id, tag_id) DO NOTHING
                    ",
                )
                .bind(update.id)
                .bind(tag_id.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM posts WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_image(&self, id: Snowflake, image: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET image = $2
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(image)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        Ok(())
    }
}
