//! Request fixtures and response mirrors for the public API.
//!
//! The response structs deserialize the exact wire format the server emits;
//! a field added or renamed on the server side breaks these tests.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::helpers::{assert_json, TestServer};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Returns a unique suffix for fixture data, so repeated runs against the
/// same database never collide on unique columns.
///
/// Microseconds since the epoch in the high digits keep values unique
/// across runs; the counter in the low digits separates calls landing in
/// the same microsecond.
pub fn unique_suffix() -> u64 {
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst) % 1000;
    let micros = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_micros()).unwrap_or(0))
        .unwrap_or(0);
    micros * 1000 + counter
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl RegisterRequest {
    /// A registration with a unique email and a password that satisfies the
    /// strength rules (length, letter, digit).
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("test{suffix}@example.com"),
            password: "TestPass123".to_string(),
            first_name: Some(format!("Fn{suffix}")),
            last_name: Some("Tester".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(register: &RegisterRequest) -> Self {
        Self {
            email: register.email.clone(),
            password: register.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl CreatePostRequest {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content: "Body text".to_string(),
            tags: None,
        }
    }

    pub fn with_tags(title: &str, tags: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            content: "Body text".to_string(),
            tags: Some(tags),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatePostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchedulePostRequest {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// RFC 3339 publication instant.
    pub created_at: String,
}

// ============================================================================
// Response mirrors
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
    #[serde(default)]
    pub fields: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub photo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub subscriptions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

#[derive(Debug, Deserialize)]
pub struct TagResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author: UserResponse,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    pub tags: Vec<TagResponse>,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct PostDetailResponse {
    pub id: String,
    pub author: UserResponse,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    pub tags: Vec<TagResponse>,
    pub like_count: i64,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author: UserResponse,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduledPostResponse {
    pub id: String,
    pub title: String,
    pub publish_at: DateTime<Utc>,
    pub status: String,
}

// ============================================================================
// Scenario helpers
// ============================================================================

/// A registered user with a live session.
pub struct TestUser {
    pub credentials: RegisterRequest,
    pub auth: AuthResponse,
}

impl TestUser {
    pub fn token(&self) -> &str {
        &self.auth.access_token
    }

    pub fn id(&self) -> &str {
        &self.auth.user.id
    }

    pub fn email(&self) -> &str {
        &self.auth.user.email
    }
}

/// Registers a fresh user and logs them in.
pub async fn signup(server: &TestServer) -> Result<TestUser> {
    let credentials = RegisterRequest::unique();
    let response = server.post("/api/v1/register", &credentials).await?;
    let _created: UserResponse = assert_json(response, StatusCode::CREATED).await?;

    let response = server
        .post("/api/v1/login", &LoginRequest::from_register(&credentials))
        .await?;
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await?;

    Ok(TestUser { credentials, auth })
}

/// Creates a post owned by the given token's user.
pub async fn create_post(server: &TestServer, token: &str, title: &str) -> Result<PostResponse> {
    let response = server
        .post_auth("/api/v1/posts", token, &CreatePostRequest::new(title))
        .await?;
    assert_json(response, StatusCode::CREATED).await
}
