//! Post service
//!
//! Handles post CRUD, tag resolution, feed listing, and image uploads.

use std::collections::{HashMap, HashSet};

use social_common::{slugify, UploadKind};
use social_core::entities::{Post, Tag, User};
use social_core::DomainError;
use social_core::query::PostFilter;
use social_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::mappers::{CommentWithAuthor, PostWithDetails, PostWithMeta};
use crate::dto::{CreatePostRequest, PostDetailResponse, PostResponse, UpdatePostRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::media::MediaService;
use super::policy::{authorize, PostAction};

/// Resolve request tag names into persistent tags
///
/// Each name is slugified before lookup; a name that slugifies to nothing
/// is rejected. Names collapsing to the same slug yield one tag.
pub(crate) async fn resolve_tags(
    ctx: &ServiceContext,
    names: &[String],
) -> ServiceResult<Vec<Tag>> {
    let mut tags: Vec<Tag> = Vec::with_capacity(names.len());

    for name in names {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(DomainError::EmptyTagName.into());
        }

        let tag = ctx
            .tag_repo()
            .get_or_create(ctx.generate_id(), &slug)
            .await?;

        if !tags.iter().any(|t| t.id == tag.id) {
            tags.push(tag);
        }
    }

    Ok(tags)
}

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new post with its tags
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_post(
        &self,
        author_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let author = self
            .ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", author_id.to_string()))?;

        let mut tags = match request.tags {
            Some(ref names) => resolve_tags(self.ctx, names).await?,
            None => Vec::new(),
        };
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        let tag_ids: Vec<Snowflake> = tags.iter().map(|t| t.id).collect();

        let post = Post::new(
            self.ctx.generate_id(),
            author_id,
            request.title,
            request.content,
        );

        self.ctx.post_repo().create(&post, &tag_ids).await?;

        info!(post_id = %post.id, author_id = %author_id, "Post created");

        Ok(PostResponse::from(PostWithMeta {
            post,
            author,
            tags,
            like_count: 0,
        }))
    }

    /// Get a single post with its comments
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: Snowflake) -> ServiceResult<PostDetailResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        let author = self.author_of(&post).await?;
        let tags = self.tags_for(post.id).await?;
        let like_count = self.like_count(post.id).await?;

        let comments = self.ctx.comment_repo().find_by_post(post.id).await?;

        // One author fetch per distinct commenter
        let mut author_cache: HashMap<Snowflake, User> = HashMap::new();
        author_cache.insert(author.id, author.clone());

        let mut comment_views = Vec::with_capacity(comments.len());
        for comment in comments {
            if !author_cache.contains_key(&comment.author_id) {
                if let Some(found) = self.ctx.user_repo().find_by_id(comment.author_id).await? {
                    author_cache.insert(found.id, found);
                }
            }
            // A comment whose author vanished mid-request is dropped
            if let Some(comment_author) = author_cache.get(&comment.author_id) {
                comment_views.push(CommentWithAuthor {
                    comment,
                    author: comment_author.clone(),
                });
            }
        }

        Ok(PostDetailResponse::from(PostWithDetails {
            post,
            author,
            tags,
            like_count,
            comments: comment_views,
        }))
    }

    /// List posts matching the filter, ordered by title
    ///
    /// Tag, like, and author data are loaded in batches rather than per
    /// post.
    #[instrument(skip(self, filter))]
    pub async fn list_posts(
        &self,
        filter: &PostFilter,
        viewer_id: Snowflake,
    ) -> ServiceResult<Vec<PostResponse>> {
        let posts = self.ctx.post_repo().list(filter, viewer_id).await?;
        let post_ids: Vec<Snowflake> = posts.iter().map(|p| p.id).collect();

        let mut tags_by_post: HashMap<Snowflake, Vec<Tag>> = HashMap::new();
        for (post_id, tag) in self.ctx.tag_repo().find_for_posts(&post_ids).await? {
            tags_by_post.entry(post_id).or_default().push(tag);
        }

        let like_counts: HashMap<Snowflake, i64> = self
            .ctx
            .like_repo()
            .count_for_posts(&post_ids)
            .await?
            .into_iter()
            .collect();

        let author_ids: HashSet<Snowflake> = posts.iter().map(|p| p.author_id).collect();
        let mut authors: HashMap<Snowflake, User> = HashMap::new();
        for author_id in author_ids {
            if let Some(user) = self.ctx.user_repo().find_by_id(author_id).await? {
                authors.insert(author_id, user);
            }
        }

        let responses = posts
            .into_iter()
            .filter_map(|post| {
                let author = authors.get(&post.author_id)?.clone();
                let tags = tags_by_post.remove(&post.id).unwrap_or_default();
                let like_count = like_counts.get(&post.id).copied().unwrap_or(0);
                Some(PostResponse::from(PostWithMeta {
                    post,
                    author,
                    tags,
                    like_count,
                }))
            })
            .collect();

        Ok(responses)
    }

    /// Update a post's title, content, and tag set
    ///
    /// Only the author may update. A `tags` value replaces the whole tag
    /// set; an empty list detaches every tag.
    #[instrument(skip(self, request))]
    pub async fn update_post(
        &self,
        actor_id: Snowflake,
        post_id: Snowflake,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let mut post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        authorize(actor_id, PostAction::Update, &post)?;

        let mut changed = false;
        if let Some(title) = request.title {
            post.title = title;
            changed = true;
        }
        if let Some(content) = request.content {
            post.content = content;
            changed = true;
        }

        let new_tags = match request.tags {
            Some(ref names) => {
                let mut tags = resolve_tags(self.ctx, names).await?;
                tags.sort_by(|a, b| a.name.cmp(&b.name));
                Some(tags)
            }
            None => None,
        };
        let tag_ids: Option<Vec<Snowflake>> = new_tags
            .as_ref()
            .map(|tags| tags.iter().map(|t| t.id).collect());

        if changed || tag_ids.is_some() {
            self.ctx
                .post_repo()
                .update(&post, tag_ids.as_deref())
                .await?;
            info!(post_id = %post.id, "Post updated");
        }

        let tags = match new_tags {
            Some(tags) => tags,
            None => self.tags_for(post.id).await?,
        };
        let author = self.author_of(&post).await?;
        let like_count = self.like_count(post.id).await?;

        Ok(PostResponse::from(PostWithMeta {
            post,
            author,
            tags,
            like_count,
        }))
    }

    /// Delete a post
    ///
    /// Only the author may delete; comments, likes, and tag links cascade.
    #[instrument(skip(self))]
    pub async fn delete_post(&self, actor_id: Snowflake, post_id: Snowflake) -> ServiceResult<()> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        authorize(actor_id, PostAction::Delete, &post)?;

        self.ctx.post_repo().delete(post.id).await?;

        info!(post_id = %post_id, "Post deleted");
        Ok(())
    }

    /// Store an uploaded image and record its path on the post
    #[instrument(skip(self, data))]
    pub async fn attach_image(
        &self,
        actor_id: Snowflake,
        post_id: Snowflake,
        filename: &str,
        data: &[u8],
    ) -> ServiceResult<PostResponse> {
        let mut post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        authorize(actor_id, PostAction::AttachImage, &post)?;

        let media = MediaService::new(self.ctx);
        let path = media
            .store_upload(UploadKind::PostImage, &post.title, filename, data)
            .await?;

        self.ctx.post_repo().set_image(post.id, &path).await?;
        post.set_image(Some(path));

        info!(post_id = %post.id, "Post image updated");

        let author = self.author_of(&post).await?;
        let tags = self.tags_for(post.id).await?;
        let like_count = self.like_count(post.id).await?;

        Ok(PostResponse::from(PostWithMeta {
            post,
            author,
            tags,
            like_count,
        }))
    }

    async fn author_of(&self, post: &Post) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(post.author_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", post.author_id.to_string()))
    }

    async fn tags_for(&self, post_id: Snowflake) -> ServiceResult<Vec<Tag>> {
        let pairs = self.ctx.tag_repo().find_for_posts(&[post_id]).await?;
        Ok(pairs.into_iter().map(|(_, tag)| tag).collect())
    }

    async fn like_count(&self, post_id: Snowflake) -> ServiceResult<i64> {
        let counts = self.ctx.like_repo().count_for_posts(&[post_id]).await?;
        Ok(counts.first().map_or(0, |(_, n)| *n))
    }
}
