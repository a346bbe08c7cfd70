//! Refresh token storage in Redis.
//!
//! A refresh token is only honored while its `jti` is present here, so
//! logout is a delete rather than waiting for JWT expiry.

use crate::pool::{RedisPool, RedisResult};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use social_core::Snowflake;

/// Key prefix for refresh tokens
const REFRESH_TOKEN_PREFIX: &str = "refresh_token:";

/// Default TTL for refresh tokens (7 days)
const DEFAULT_REFRESH_TOKEN_TTL: u64 = 7 * 24 * 60 * 60;

/// Stored refresh token data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenData {
    /// User ID this token belongs to
    pub user_id: Snowflake,
    /// Token creation timestamp (Unix epoch seconds)
    pub created_at: i64,
}

impl RefreshTokenData {
    /// Create new refresh token data
    #[must_use]
    pub fn new(user_id: Snowflake) -> Self {
        Self {
            user_id,
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Refresh token store for managing authentication sessions
#[derive(Clone)]
pub struct RefreshTokenStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl RefreshTokenStore {
    /// Create a new refresh token store
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            ttl_seconds: DEFAULT_REFRESH_TOKEN_TTL,
        }
    }

    /// Create with custom TTL
    #[must_use]
    pub fn with_ttl(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    /// Generate Redis key for a refresh token
    fn key(jti: &str) -> String {
        format!("{REFRESH_TOKEN_PREFIX}{jti}")
    }

    /// Generate Redis key for a user's token index
    fn user_set_key(user_id: Snowflake) -> String {
        format!("user_tokens:{user_id}")
    }

    /// Store a refresh token under its `jti`
    pub async fn store(&self, jti: &str, data: &RefreshTokenData) -> RedisResult<()> {
        let key = Self::key(jti);
        self.pool.set(&key, data, Some(self.ttl_seconds)).await?;

        // Also add to user's token set for bulk revocation
        let user_set_key = Self::user_set_key(data.user_id);
        let mut conn = self.pool.get().await?;
        conn.sadd::<_, _, ()>(&user_set_key, jti).await?;
        conn.expire::<_, ()>(&user_set_key, self.ttl_seconds as i64)
            .await?;

        tracing::debug!(
            jti = %jti,
            user_id = %data.user_id,
            "Stored refresh token"
        );

        Ok(())
    }

    /// Get refresh token data (None when expired or never stored)
    pub async fn get(&self, jti: &str) -> RedisResult<Option<RefreshTokenData>> {
        let key = Self::key(jti);
        self.pool.get_value(&key).await
    }

    /// Revoke (delete) a refresh token
    pub async fn revoke(&self, jti: &str) -> RedisResult<bool> {
        // First get the token to find user_id
        if let Some(data) = self.get(jti).await? {
            // Remove from user's token set
            let user_set_key = Self::user_set_key(data.user_id);
            let mut conn = self.pool.get().await?;
            conn.srem::<_, _, ()>(&user_set_key, jti).await?;
        }

        let key = Self::key(jti);
        let deleted = self.pool.delete(&key).await?;

        if deleted {
            tracing::debug!(jti = %jti, "Revoked refresh token");
        }

        Ok(deleted)
    }

    /// Revoke all tokens for a user (logout from all devices)
    pub async fn revoke_all_for_user(&self, user_id: Snowflake) -> RedisResult<u32> {
        let user_set_key = Self::user_set_key(user_id);
        let mut conn = self.pool.get().await?;

        // Get all token IDs for this user
        let jtis: Vec<String> = conn.smembers(&user_set_key).await?;
        let count = jtis.len() as u32;

        if !jtis.is_empty() {
            // Delete all tokens
            let keys: Vec<String> = jtis.iter().map(|jti| Self::key(jti)).collect();
            let keys_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
            self.pool.delete_many(&keys_refs).await?;
        }

        // Delete the user's token set
        conn.del::<_, ()>(&user_set_key).await?;

        tracing::info!(
            user_id = %user_id,
            count = count,
            "Revoked all refresh tokens for user"
        );

        Ok(count)
    }
}
