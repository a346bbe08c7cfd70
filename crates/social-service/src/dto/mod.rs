//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateCommentRequest, CreatePostRequest, LoginRequest, RefreshTokenRequest, RegisterRequest,
    SchedulePostRequest, UpdatePostRequest, UpdateUserRequest,
};

// Re-export commonly used response types
pub use responses::{
    AuthResponse, CommentResponse, CurrentUserResponse, DetailResponse, HealthChecks,
    HealthResponse, PostDetailResponse, PostResponse, ReadinessResponse, ScheduledPostResponse,
    TagResponse, ToggleOutcome, UserResponse,
};

// Re-export mappers and helper structs
pub use mappers::{CommentWithAuthor, CurrentUserProfile, PostWithDetails, PostWithMeta};
