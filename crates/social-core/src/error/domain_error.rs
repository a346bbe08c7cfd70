//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Title too long: max {max} characters")]
    TitleTooLong { max: usize },

    #[error("Invalid tag id: {token}")]
    InvalidTagFilter { token: String },

    #[error("Tag name cannot be empty")]
    EmptyTagName,

    #[error("Unsupported image type: {0}")]
    UnsupportedImageType(String),

    #[error("File too large: max {max_bytes} bytes")]
    FileTooLarge { max_bytes: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the post author")]
    NotPostAuthor,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("You cannot subscribe to yourself")]
    SelfSubscription,

    #[error("You cannot like your own post")]
    SelfLike,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::TitleTooLong { .. } => "TITLE_TOO_LONG",
            Self::InvalidTagFilter { .. } => "INVALID_TAG_FILTER",
            Self::EmptyTagName => "EMPTY_TAG_NAME",
            Self::UnsupportedImageType(_) => "UNSUPPORTED_IMAGE_TYPE",
            Self::FileTooLarge { .. } => "FILE_TOO_LARGE",

            // Authorization
            Self::NotPostAuthor => "NOT_POST_AUTHOR",

            // Business Rules
            Self::SelfSubscription => "SELF_SUBSCRIPTION",
            Self::SelfLike => "SELF_LIKE",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::PostNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::WeakPassword(_)
                | Self::TitleTooLong { .. }
                | Self::InvalidTagFilter { .. }
                | Self::EmptyTagName
                | Self::UnsupportedImageType(_)
                | Self::FileTooLarge { .. }
                | Self::SelfSubscription
                | Self::SelfLike
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotPostAuthor)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists)
    }
}
