//! Access token denylist in Redis.
//!
//! Logout cannot recall an already-issued access token, so its `jti` is
//! parked here until the token would have expired anyway. Entries carry a
//! TTL equal to the token's remaining lifetime and clean themselves up.

use crate::pool::{RedisPool, RedisResult};

/// Key prefix for revoked access tokens
const REVOKED_TOKEN_PREFIX: &str = "revoked_token:";

/// Denylist of revoked access tokens
#[derive(Clone)]
pub struct RevokedTokenStore {
    pool: RedisPool,
}

impl RevokedTokenStore {
    /// Create a new revoked token store
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Generate Redis key for a revoked token
    fn key(jti: &str) -> String {
        format!("{REVOKED_TOKEN_PREFIX}{jti}")
    }

    /// Mark a token as revoked for `ttl_seconds`
    ///
    /// A zero TTL means the token is already expired; nothing is stored.
    pub async fn revoke(&self, jti: &str, ttl_seconds: u64) -> RedisResult<()> {
        if ttl_seconds == 0 {
            return Ok(());
        }

        let key = Self::key(jti);
        self.pool.set(&key, &true, Some(ttl_seconds)).await?;

        tracing::debug!(jti = %jti, ttl_seconds, "Revoked access token");

        Ok(())
    }

    /// Check whether a token has been revoked
    pub async fn is_revoked(&self, jti: &str) -> RedisResult<bool> {
        let key = Self::key(jti);
        self.pool.exists(&key).await
    }
}
