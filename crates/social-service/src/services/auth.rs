//! Authentication service
//!
//! Handles user registration, login, token refresh, and logout.

use social_cache::RefreshTokenData;
use social_common::auth::{hash_password, validate_password_strength, verify_password};
use social_common::{AppError, Claims, TokenPair};
use social_core::entities::User;
use tracing::{info, instrument, warn};

use crate::dto::mappers::CurrentUserProfile;
use crate::dto::{
    AuthResponse, CurrentUserResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
    UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    ///
    /// Registration does not log the user in; the caller authenticates
    /// separately via `login`.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<UserResponse> {
        // Validate password strength before proceeding
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        // Check if email already exists
        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(social_core::DomainError::EmailAlreadyExists.into());
        }

        // Hash password
        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        // Create user
        let user_id = self.ctx.generate_id();
        let user = User::new(
            user_id,
            request.email,
            request.first_name.unwrap_or_default(),
            request.last_name.unwrap_or_default(),
        );

        // Save to database
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user_id, "User registered successfully");

        Ok(UserResponse::from(&user))
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        // Find user by email
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        // Get password hash
        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        // Verify password
        let is_valid = verify_password(&request.password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in successfully");

        // Generate tokens and store the refresh session
        let token_pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        self.store_refresh_session(&token_pair, user.id).await?;

        self.auth_response(token_pair, user).await
    }

    /// Refresh access token using refresh token
    ///
    /// The presented refresh token is rotated: its session record is
    /// revoked and a new pair is issued.
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(
        &self,
        request: RefreshTokenRequest,
    ) -> ServiceResult<AuthResponse> {
        // Decode and verify the token signature first
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)
            .map_err(ServiceError::from)?;

        // The session record must still exist in Redis
        let refresh_data = self
            .ctx
            .refresh_token_store()
            .get(&claims.jti)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        // Get user
        let user = self
            .ctx
            .user_repo()
            .find_by_id(refresh_data.user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", refresh_data.user_id.to_string()))?;

        // Revoke old refresh token session
        self.ctx
            .refresh_token_store()
            .revoke(&claims.jti)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        // Generate new tokens
        let token_pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        self.store_refresh_session(&token_pair, user.id).await?;

        info!(user_id = %user.id, "Tokens refreshed successfully");

        self.auth_response(token_pair, user).await
    }

    /// Logout by revoking the presented access token and every refresh session
    ///
    /// The access token goes on the denylist for its remaining lifetime,
    /// so it stops working immediately rather than at natural expiry.
    #[instrument(skip(self, claims))]
    pub async fn logout(&self, claims: &Claims) -> ServiceResult<()> {
        let user_id = claims.user_id().map_err(ServiceError::from)?;

        self.ctx
            .revoked_token_store()
            .revoke(&claims.jti, claims.remaining_lifetime() as u64)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        self.ctx
            .refresh_token_store()
            .revoke_all_for_user(user_id)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        info!(user_id = %user_id, "User logged out successfully");
        Ok(())
    }

    /// Validate an access token and return its claims
    ///
    /// Rejects tokens on the revocation denylist even when their
    /// signature and expiry are still valid.
    #[instrument(skip(self, token))]
    pub async fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_access_token(token)
            .map_err(ServiceError::from)?;

        let revoked = self
            .ctx
            .revoked_token_store()
            .is_revoked(&claims.jti)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if revoked {
            return Err(ServiceError::App(AppError::TokenRevoked));
        }

        Ok(claims)
    }

    /// Get user by access token
    #[instrument(skip(self, token))]
    pub async fn get_user_from_token(&self, token: &str) -> ServiceResult<User> {
        let claims = self.validate_token(token).await?;
        let user_id = claims.user_id().map_err(ServiceError::from)?;

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// Record the refresh session under the new token's jti
    async fn store_refresh_session(
        &self,
        token_pair: &TokenPair,
        user_id: social_core::Snowflake,
    ) -> ServiceResult<()> {
        // The store is keyed by jti; decode the freshly minted token to get it
        let refresh_claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&token_pair.refresh_token)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        self.ctx
            .refresh_token_store()
            .store(&refresh_claims.jti, &RefreshTokenData::new(user_id))
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        Ok(())
    }

    /// Build the authenticated profile payload returned by login and refresh
    async fn auth_response(
        &self,
        token_pair: TokenPair,
        user: User,
    ) -> ServiceResult<AuthResponse> {
        let subscription_ids = self.ctx.subscription_repo().followee_ids(user.id).await?;
        let profile = CurrentUserProfile {
            user,
            subscription_ids,
        };

        Ok(AuthResponse::new(
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
            CurrentUserResponse::from(profile),
        ))
    }
}
