//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use social_core::entities::User;
use social_core::error::DomainError;
use social_core::query::UserFilter;
use social_core::traits::{RepoResult, UserRepository};
use social_core::value_objects::Snowflake;

use crate::mappers::{UserInsert, UserUpdate};
use crate::models::UserModel;

use super::error::{escape_like_pattern, map_db_error, map_unique_violation, user_not_found};

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, photo, bio, \
                            is_staff, is_superuser, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, password_hash, first_name, last_name, photo, bio,
                   is_staff, is_superuser, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, password_hash, first_name, last_name, photo, bio,
                   is_staff, is_superuser, created_at, updated_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))
            ",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &UserFilter) -> RepoResult<Vec<User>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {USER_COLUMNS} FROM users WHERE TRUE"
        ));

        if let Some(email) = &filter.email {
            builder.push(" AND LOWER(email) = LOWER(");
            builder.push_bind(email);
            builder.push(")");
        }
        if let Some(first_name) = &filter.first_name {
            builder.push(" AND first_name ILIKE ");
            builder.push_bind(format!("%{}%", escape_like_pattern(first_name)));
        }
        if let Some(last_name) = &filter.last_name {
            builder.push(" AND last_name ILIKE ");
            builder.push_bind(format!("%{}%", escape_like_pattern(last_name)));
        }
        builder.push(" ORDER BY id");

        let results = builder
            .build_query_as::<UserModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let insert = UserInsert::new(user, password_hash);

        sqlx::query(
            r"
            INSERT INTO users (id, email, password_hash, first_name, last_name, photo, bio,
                               is_staff, is_superuser, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(insert.id)
        .bind(insert.email)
        .bind(insert.password_hash)
        .bind(insert.first_name)
        .bind(insert.last_name)
        .bind(insert.photo)
        .bind(insert.bio)
        .bind(insert.is_staff)
        .bind(insert.is_superuser)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let update = UserUpdate::new(user);

        let result = sqlx::query(
            r"
            UPDATE users
            SET email = $2, first_name = $3, last_name = $4, photo = $5, bio = $6,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(update.id)
        .bind(update.email)
        .bind(update.first_name)
        .bind(update.last_name)
        .bind(update.photo)
        .bind(update.bio)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM users WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM users WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }
}
