//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use social_core::entities::{Comment, Post, ScheduledPost, Tag, User};
use social_core::Snowflake;

use super::responses::{
    CommentResponse, CurrentUserResponse, PostDetailResponse, PostResponse,
    ScheduledPostResponse, TagResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            photo: user.photo.clone(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// Helper struct for building the own-profile representation
pub struct CurrentUserProfile {
    pub user: User,
    pub subscription_ids: Vec<Snowflake>,
}

impl From<CurrentUserProfile> for CurrentUserResponse {
    fn from(profile: CurrentUserProfile) -> Self {
        Self {
            id: profile.user.id.to_string(),
            email: profile.user.email,
            first_name: profile.user.first_name,
            last_name: profile.user.last_name,
            photo: profile.user.photo,
            bio: profile.user.bio,
            is_staff: profile.user.is_staff,
            is_superuser: profile.user.is_superuser,
            subscriptions: profile
                .subscription_ids
                .iter()
                .map(Snowflake::to_string)
                .collect(),
            created_at: profile.user.created_at,
            updated_at: profile.user.updated_at,
        }
    }
}

// ============================================================================
// Tag Mappers
// ============================================================================

impl From<&Tag> for TagResponse {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id.to_string(),
            name: tag.name.clone(),
        }
    }
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self::from(&tag)
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

/// Helper struct for building a post list item
pub struct PostWithMeta {
    pub post: Post,
    pub author: User,
    pub tags: Vec<Tag>,
    pub like_count: i64,
}

impl From<PostWithMeta> for PostResponse {
    fn from(meta: PostWithMeta) -> Self {
        Self {
            id: meta.post.id.to_string(),
            author: UserResponse::from(&meta.author),
            title: meta.post.title,
            content: meta.post.content,
            image: meta.post.image,
            tags: meta.tags.into_iter().map(TagResponse::from).collect(),
            like_count: meta.like_count,
            created_at: meta.post.created_at,
        }
    }
}

/// Helper struct for building a detailed post view
pub struct PostWithDetails {
    pub post: Post,
    pub author: User,
    pub tags: Vec<Tag>,
    pub like_count: i64,
    pub comments: Vec<CommentWithAuthor>,
}

impl From<PostWithDetails> for PostDetailResponse {
    fn from(details: PostWithDetails) -> Self {
        Self {
            id: details.post.id.to_string(),
            author: UserResponse::from(&details.author),
            title: details.post.title,
            content: details.post.content,
            image: details.post.image,
            tags: details.tags.into_iter().map(TagResponse::from).collect(),
            like_count: details.like_count,
            comments: details
                .comments
                .into_iter()
                .map(CommentResponse::from)
                .collect(),
            created_at: details.post.created_at,
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

/// Helper struct pairing a comment with its author
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: User,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(cwa: CommentWithAuthor) -> Self {
        Self {
            id: cwa.comment.id.to_string(),
            post_id: cwa.comment.post_id.to_string(),
            author: UserResponse::from(&cwa.author),
            content: cwa.comment.content,
            created_at: cwa.comment.created_at,
        }
    }
}

// ============================================================================
// Scheduling Mappers
// ============================================================================

impl From<&ScheduledPost> for ScheduledPostResponse {
    fn from(job: &ScheduledPost) -> Self {
        Self {
            id: job.id.to_string(),
            title: job.title.clone(),
            publish_at: job.publish_at,
            status: "scheduled".to_string(),
        }
    }
}
