//! Post handlers
//!
//! Endpoints for publishing, reading, editing and deleting posts.

use axum::{extract::State, Json};
use feed_service::dto::{CreatePostRequest, PostSummary, UpdatePostRequest};
use feed_service::PostService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List every post, newest first
///
/// GET /posts
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<PostSummary>>> {
    let posts = PostService::new(state.service_context()).list_posts().await?;
    Ok(Json(posts))
}

/// Create post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostSummary>>> {
    let post = PostService::new(state.service_context())
        .create_post(auth.user_id, request)
        .await?;
    Ok(Created(Json(post)))
}

/// List posts of the current user
///
/// GET /posts/@me
pub async fn list_my_posts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PostSummary>>> {
    let posts = PostService::new(state.service_context())
        .list_user_posts(auth.user_id)
        .await?;
    Ok(Json(posts))
}

/// Posts by the authors the current user follows
///
/// GET /posts/subscribed
pub async fn list_subscribed_posts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PostSummary>>> {
    let posts = PostService::new(state.service_context())
        .list_subscribed_posts(auth.user_id)
        .await?;
    Ok(Json(posts))
}

/// Get post, recording a view
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<PostSummary>> {
    let post = PostService::new(state.service_context())
        .get_post(post_id)
        .await?;
    Ok(Json(post))
}

/// Update post
///
/// PATCH /posts/{post_id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostSummary>> {
    let post = PostService::new(state.service_context())
        .update_post(auth.user_id, post_id, request)
        .await?;
    Ok(Json(post))
}

/// Delete post
///
/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<NoContent> {
    PostService::new(state.service_context())
        .delete_post(auth.user_id, post_id)
        .await?;
    Ok(NoContent)
}
