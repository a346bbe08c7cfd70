//! Comment service

use social_core::entities::Comment;
use social_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::mappers::CommentWithAuthor;
use crate::dto::{CommentResponse, CreateCommentRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::policy::{authorize, PostAction};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a comment to a post
    #[instrument(skip(self, request))]
    pub async fn create_comment(
        &self,
        author_id: Snowflake,
        post_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        authorize(author_id, PostAction::Comment, &post)?;

        let author = self
            .ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", author_id.to_string()))?;

        let comment = Comment::new(self.ctx.generate_id(), post.id, author_id, request.content);

        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, post_id = %post_id, "Comment created");

        Ok(CommentResponse::from(CommentWithAuthor { comment, author }))
    }
}
