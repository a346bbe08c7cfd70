//! Like service
//!
//! Handles the like/unlike toggle on posts.

use social_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::ToggleOutcome;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::policy::{authorize, PostAction};

/// Like service
pub struct LikeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikeService<'a> {
    /// Create a new LikeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Like a post
    ///
    /// Authors cannot like their own posts. Liking twice reports the
    /// existing state instead of failing.
    #[instrument(skip(self))]
    pub async fn like(&self, user_id: Snowflake, post_id: Snowflake) -> ServiceResult<ToggleOutcome> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        authorize(user_id, PostAction::Like, &post)?;

        let added = self.ctx.like_repo().add(post_id, user_id).await?;

        if added {
            info!(post_id = %post_id, user_id = %user_id, "Like added");
            Ok(ToggleOutcome::created(format!("You liked {}", post.title)))
        } else {
            Ok(ToggleOutcome::unchanged("Already liked"))
        }
    }

    /// Remove a like from a post
    #[instrument(skip(self))]
    pub async fn unlike(
        &self,
        user_id: Snowflake,
        post_id: Snowflake,
    ) -> ServiceResult<ToggleOutcome> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        let removed = self.ctx.like_repo().remove(post_id, user_id).await?;

        if removed {
            info!(post_id = %post_id, user_id = %user_id, "Like removed");
            Ok(ToggleOutcome::unchanged(format!(
                "You unliked {}",
                post.title
            )))
        } else {
            Ok(ToggleOutcome::unchanged(format!(
                "You have not liked {}",
                post.title
            )))
        }
    }
}
