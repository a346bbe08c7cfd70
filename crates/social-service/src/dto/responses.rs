//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Human-readable outcome body, `{"detail": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Outcome of an idempotent membership mutation (subscribe/like)
///
/// `created` is true only when a new row came into being; the handler maps
/// it to 201, everything else to 200. The detail string is the response
/// body either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub created: bool,
    pub detail: String,
}

impl ToggleOutcome {
    /// A mutation that created the row
    pub fn created(detail: impl Into<String>) -> Self {
        Self {
            created: true,
            detail: detail.into(),
        }
    }

    /// A mutation that found the target state already in place
    pub fn unchanged(detail: impl Into<String>) -> Self {
        Self {
            created: false,
            detail: detail.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: CurrentUserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user representation
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// Own-profile representation (includes bio, privilege flags and the ids
/// of every user this one subscribes to)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub subscriptions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Content Responses
// ============================================================================

/// Tag response
#[derive(Debug, Clone, Serialize)]
pub struct TagResponse {
    pub id: String,
    pub name: String,
}

/// Post list-item representation with tags and like count
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub author: UserResponse,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub tags: Vec<TagResponse>,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Detailed post representation including its comments (newest first)
#[derive(Debug, Clone, Serialize)]
pub struct PostDetailResponse {
    pub id: String,
    pub author: UserResponse,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub tags: Vec<TagResponse>,
    pub like_count: i64,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
}

/// Comment response
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author: UserResponse,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Scheduling Responses
// ============================================================================

/// Accepted publication job
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledPostResponse {
    pub id: String,
    pub title: String,
    pub publish_at: DateTime<Utc>,
    pub status: String,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let all_healthy = database_healthy && redis_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                redis: if redis_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
