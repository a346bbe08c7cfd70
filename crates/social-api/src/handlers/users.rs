//! User handlers
//!
//! Endpoints for profile management, user listing, and subscriptions.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use social_service::{
    CurrentUserResponse, SubscriptionService, UpdateUserRequest, UserResponse, UserService,
};

use crate::extractors::{AuthUser, UserFilterQuery, UserIdPath, ValidatedJson};
use crate::handlers::read_file_field;
use crate::response::{ApiResult, NoContent, Toggled};
use crate::state::AppState;

/// Get current user profile
///
/// GET /users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current_user(auth.user_id).await?;
    Ok(Json(response))
}

/// Update current user profile
///
/// PUT|PATCH /users/me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete current user account
///
/// DELETE /users/me
pub async fn delete_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.delete_account(auth.user_id).await?;
    Ok(NoContent)
}

/// Upload current user's profile photo
///
/// POST /users/me/photo
pub async fn upload_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> ApiResult<Json<CurrentUserResponse>> {
    let (filename, data) = read_file_field(multipart, "photo").await?;

    let service = UserService::new(state.service_context());
    let response = service
        .attach_photo(auth.user_id, &filename, &data)
        .await?;
    Ok(Json(response))
}

/// List users with optional filters
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
    UserFilterQuery(filter): UserFilterQuery,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let users = service.list_users(&filter).await?;
    Ok(Json(users))
}

/// Get user by ID (public profile)
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = path.user_id()?;

    let service = UserService::new(state.service_context());
    let response = service.get_user(user_id).await?;
    Ok(Json(response))
}

/// Subscribe to a user
///
/// POST /users/{user_id}/subscribe
pub async fn subscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Toggled> {
    let target_id = path.user_id()?;

    let service = SubscriptionService::new(state.service_context());
    let outcome = service.subscribe(auth.user_id, target_id).await?;
    Ok(Toggled(outcome))
}

/// Unsubscribe from a user
///
/// POST /users/{user_id}/unsubscribe
pub async fn unsubscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Toggled> {
    let target_id = path.user_id()?;

    let service = SubscriptionService::new(state.service_context());
    let outcome = service.unsubscribe(auth.user_id, target_id).await?;
    Ok(Toggled(outcome))
}
