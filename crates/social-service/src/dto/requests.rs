//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(length(max = 150, message = "First name must be at most 150 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 150, message = "Last name must be at most 150 characters"))]
    pub last_name: Option<String>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Partial update of the authenticated user's profile
///
/// Both PUT and PATCH share these semantics: absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: Option<String>,

    #[validate(length(max = 150, message = "First name must be at most 150 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 150, message = "Last name must be at most 150 characters"))]
    pub last_name: Option<String>,

    pub bio: Option<String>,
}

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
///
/// Tag names are free-form; they are slugified and resolved get-or-create.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,

    pub tags: Option<Vec<String>>,
}

/// Partial update of a post
///
/// Supplying `tags` replaces the whole tag set; an empty list detaches
/// every tag.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: Option<String>,

    pub tags: Option<Vec<String>>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,
}

// ============================================================================
// Scheduling Requests
// ============================================================================

/// Schedule a post for deferred publication
///
/// `created_at` is the desired publication instant; the published post
/// carries it as its own `created_at`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SchedulePostRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,

    pub tags: Option<Vec<String>>,

    pub created_at: DateTime<Utc>,
}
