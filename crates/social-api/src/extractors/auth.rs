//! Authentication extractor
//!
//! Extracts and validates JWT tokens from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use social_common::Claims;
use social_core::Snowflake;
use social_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from JWT token
///
/// Validation goes through the auth service rather than the bare JWT
/// decoder so that tokens revoked by logout are rejected immediately.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the JWT token
    pub user_id: Snowflake,
    /// Full claims, kept so logout can revoke the exact token
    pub claims: Claims,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: Snowflake, claims: Claims) -> Self {
        Self { user_id, claims }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Authorization header
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        // Validate signature, expiry, and the revocation denylist
        let app_state = AppState::from_ref(state);
        let claims = AuthService::new(app_state.service_context())
            .validate_token(bearer.token())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::Service(e)
            })?;

        // Extract user ID from claims
        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid user ID in token");
            ApiError::App(e)
        })?;

        Ok(AuthUser::new(user_id, claims))
    }
}
