//! Post handlers
//!
//! Endpoints for posts, likes, comments, image uploads, and scheduling.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use social_service::{
    CommentResponse, CommentService, CreateCommentRequest, CreatePostRequest, LikeService,
    PostDetailResponse, PostResponse, PostService, SchedulePostRequest, ScheduledPostResponse,
    SchedulerService, UpdatePostRequest,
};

use crate::extractors::{AuthUser, PostFilterQuery, PostIdPath, ValidatedJson};
use crate::handlers::read_file_field;
use crate::response::{ApiResult, Created, NoContent, Toggled};
use crate::state::AppState;

/// Create a new post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.create_post(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List posts with optional filters
///
/// GET /posts
pub async fn list_posts(
    State(state): State<AppState>,
    auth: AuthUser,
    PostFilterQuery(filter): PostFilterQuery,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let posts = service.list_posts(&filter, auth.user_id).await?;
    Ok(Json(posts))
}

/// Get post by ID with comments
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<PostDetailResponse>> {
    let post_id = path.post_id()?;

    let service = PostService::new(state.service_context());
    let response = service.get_post(post_id).await?;
    Ok(Json(response))
}

/// Update a post
///
/// PUT|PATCH /posts/{post_id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let post_id = path.post_id()?;

    let service = PostService::new(state.service_context());
    let response = service.update_post(auth.user_id, post_id, request).await?;
    Ok(Json(response))
}

/// Delete a post
///
/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<NoContent> {
    let post_id = path.post_id()?;

    let service = PostService::new(state.service_context());
    service.delete_post(auth.user_id, post_id).await?;
    Ok(NoContent)
}

/// Like a post
///
/// POST /posts/{post_id}/like
pub async fn like_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Toggled> {
    let post_id = path.post_id()?;

    let service = LikeService::new(state.service_context());
    let outcome = service.like(auth.user_id, post_id).await?;
    Ok(Toggled(outcome))
}

/// Unlike a post
///
/// POST /posts/{post_id}/unlike
pub async fn unlike_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Toggled> {
    let post_id = path.post_id()?;

    let service = LikeService::new(state.service_context());
    let outcome = service.unlike(auth.user_id, post_id).await?;
    Ok(Toggled(outcome))
}

/// Comment on a post
///
/// POST /posts/{post_id}/comment
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let post_id = path.post_id()?;

    let service = CommentService::new(state.service_context());
    let response = service
        .create_comment(auth.user_id, post_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// Upload a post image
///
/// POST /posts/{post_id}/image
pub async fn upload_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    multipart: Multipart,
) -> ApiResult<Json<PostResponse>> {
    let post_id = path.post_id()?;
    let (filename, data) = read_file_field(multipart, "image").await?;

    let service = PostService::new(state.service_context());
    let response = service
        .attach_image(auth.user_id, post_id, &filename, &data)
        .await?;
    Ok(Json(response))
}

/// Schedule a post for deferred publication
///
/// POST /posts/schedule
pub async fn schedule_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SchedulePostRequest>,
) -> ApiResult<Created<Json<ScheduledPostResponse>>> {
    let service = SchedulerService::new(state.service_context());
    let response = service.schedule(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}
