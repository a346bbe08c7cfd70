//! # social-cache
//!
//! Redis caching layer for authentication session state.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Refresh Tokens**: Server-side session records keyed by token `jti`
//! - **Revocation Denylist**: Logged-out access tokens until natural expiry
//!
//! ## Example
//!
//! ```ignore
//! use social_cache::{RedisPool, RedisPoolConfig, RefreshTokenStore, RefreshTokenData};
//!
//! // Create Redis pool
//! let config = RedisPoolConfig::default();
//! let pool = RedisPool::new(config)?;
//!
//! // Store a refresh token under its jti
//! let store = RefreshTokenStore::new(pool.clone());
//! store.store(&jti, &RefreshTokenData::new(user_id)).await?;
//! ```

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export session types
pub use session::{RefreshTokenData, RefreshTokenStore, RevokedTokenStore};
