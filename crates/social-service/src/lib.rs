//! # social-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export the request/response types handlers work with
pub use dto::{
    AuthResponse, CommentResponse, CreateCommentRequest, CreatePostRequest, CurrentUserResponse,
    DetailResponse, HealthChecks, HealthResponse, LoginRequest, PostDetailResponse, PostResponse,
    ReadinessResponse, RefreshTokenRequest, RegisterRequest, SchedulePostRequest,
    ScheduledPostResponse, TagResponse, ToggleOutcome, UpdatePostRequest, UpdateUserRequest,
    UserResponse,
};

// Re-export services and their support types
pub use services::{
    AuthService, CommentService, LikeService, MediaService, PostService, PublicationWorker,
    SchedulerService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    SubscriptionService, UserService,
};
