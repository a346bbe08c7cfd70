//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Comment, Post, ScheduledPost, Tag, User};
use crate::error::DomainError;
use crate::query::{PostFilter, UserFilter};
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken (case-insensitive)
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// List users matching the filter, ordered by id
    async fn list(&self, filter: &UserFilter) -> RepoResult<Vec<User>>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update an existing user's profile fields
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Hard delete a user; dependent rows cascade
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Subscription Repository
// ============================================================================

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Add a subscription edge; returns false when it already existed
    async fn add(&self, follower_id: Snowflake, followee_id: Snowflake) -> RepoResult<bool>;

    /// Remove a subscription edge; returns false when it did not exist
    async fn remove(&self, follower_id: Snowflake, followee_id: Snowflake) -> RepoResult<bool>;

    /// Ids of all users the given user subscribes to
    async fn followee_ids(&self, follower_id: Snowflake) -> RepoResult<Vec<Snowflake>>;
}

// ============================================================================
// Tag Repository
// ============================================================================

#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Fetch the tag with this name, inserting it with the candidate id
    /// when absent; concurrent callers converge on one row
    async fn get_or_create(&self, candidate_id: Snowflake, name: &str) -> RepoResult<Tag>;

    /// Tags attached to each of the given posts, ordered by tag name
    async fn find_for_posts(&self, post_ids: &[Snowflake])
        -> RepoResult<Vec<(Snowflake, Tag)>>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// List posts matching the filter, ordered by title
    ///
    /// Viewer-relative predicates resolve against `viewer_id`.
    async fn list(&self, filter: &PostFilter, viewer_id: Snowflake) -> RepoResult<Vec<Post>>;

    /// Create a post together with its tag links
    async fn create(&self, post: &Post, tag_ids: &[Snowflake]) -> RepoResult<()>;

    /// Update title/content; `tag_ids` of `Some` replaces the tag set
    async fn update(&self, post: &Post, tag_ids: Option<&[Snowflake]>) -> RepoResult<()>;

    /// Hard delete a post; comments, likes and tag links cascade
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Update the image path
    async fn set_image(&self, id: Snowflake, image: &str) -> RepoResult<()>;
}

// ============================================================================
// Like Repository
// ============================================================================

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Add a like; returns false when the pair already existed
    async fn add(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Remove a like; returns false when the pair did not exist
    async fn remove(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Like counts for each of the given posts; posts with zero likes
    /// are omitted
    async fn count_for_posts(&self, post_ids: &[Snowflake])
        -> RepoResult<Vec<(Snowflake, i64)>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Create a new comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Comments on a post, newest first
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>>;
}

// ============================================================================
// Scheduled Post Repository
// ============================================================================

#[async_trait]
pub trait ScheduledPostRepository: Send + Sync {
    /// Persist a new publication job
    async fn create(&self, job: &ScheduledPost) -> RepoResult<()>;

    /// Atomically claim every job due at `now`: marks them fired and
    /// returns them; a job is ever returned to one caller only
    async fn claim_due(&self, now: DateTime<Utc>) -> RepoResult<Vec<ScheduledPost>>;
}
