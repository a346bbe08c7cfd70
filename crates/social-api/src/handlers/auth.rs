//! Authentication handlers
//!
//! Endpoints for user registration, login, logout, and token refresh.

use axum::{extract::State, Json};
use social_service::{
    AuthResponse, AuthService, DetailResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
    UserResponse,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new user
///
/// POST /register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Refresh access token
///
/// POST /refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh_tokens(request).await?;
    Ok(Json(response))
}

/// Logout user
///
/// POST /logout
///
/// Revokes the presented access token and every refresh session of
/// the user.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DetailResponse>> {
    let service = AuthService::new(state.service_context());
    service.logout(&auth.claims).await?;
    Ok(Json(DetailResponse::new("Logged out")))
}
