//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{auth, health, posts, users};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(post_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh_token))
        .route("/logout", post(auth::logout))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/me", get(users::get_current_user))
        .route("/users/me", put(users::update_current_user))
        .route("/users/me", patch(users::update_current_user))
        .route("/users/me", delete(users::delete_current_user))
        .route("/users/me/photo", post(users::upload_photo))
        .route("/users/:user_id", get(users::get_user))
        .route("/users/:user_id/subscribe", post(users::subscribe))
        .route("/users/:user_id/unsubscribe", post(users::unsubscribe))
}

/// Post routes
///
/// The literal /posts/schedule segment must be registered alongside the
/// :post_id captures; axum gives literals priority.
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list_posts))
        .route("/posts", post(posts::create_post))
        .route("/posts/schedule", post(posts::schedule_post))
        .route("/posts/:post_id", get(posts::get_post))
        .route("/posts/:post_id", put(posts::update_post))
        .route("/posts/:post_id", patch(posts::update_post))
        .route("/posts/:post_id", delete(posts::delete_post))
        .route("/posts/:post_id/like", post(posts::like_post))
        .route("/posts/:post_id/unlike", post(posts::unlike_post))
        .route("/posts/:post_id/comment", post(posts::create_comment))
        .route("/posts/:post_id/image", post(posts::upload_image))
}
