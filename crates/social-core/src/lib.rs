//! # social-core
//!
//! Domain layer containing entities, value objects, repository traits, and
//! query filter types. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod query;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Comment, Like, Post, ScheduledPost, Subscription, Tag, User};
pub use error::DomainError;
pub use query::{PostFilter, UserFilter};
pub use traits::{
    CommentRepository, LikeRepository, PostRepository, RepoResult, ScheduledPostRepository,
    SubscriptionRepository, TagRepository, UserRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
