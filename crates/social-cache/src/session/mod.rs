//! Session storage module.
//!
//! Provides Redis-backed storage for:
//! - Refresh tokens (authentication sessions)
//! - Revoked access tokens (logout denylist)

mod refresh_token;
mod revoked_token;

pub use refresh_token::{RefreshTokenData, RefreshTokenStore};
pub use revoked_token::RevokedTokenStore;
