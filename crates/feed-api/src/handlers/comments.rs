//! Comment handlers
//!
//! Endpoints for the comment thread of a post.

use axum::{extract::State, Json};
use feed_service::dto::{
    CommentCountResponse, CommentThreadResponse, CreateCommentRequest, ReplyResponse,
};
use feed_service::{CommentService, EngagementService};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Number of comments plus responses
///
/// GET /posts/{post_id}/comments/count
pub async fn count_comments(
    State(state): State<AppState>,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<CommentCountResponse>> {
    let count = EngagementService::new(state.service_context())
        .count_comments(post_id)
        .await?;
    Ok(Json(count))
}

/// List comments with their responses
///
/// GET /posts/{post_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<Vec<CommentThreadResponse>>> {
    let comments = CommentService::new(state.service_context())
        .list_comments(post_id)
        .await?;
    Ok(Json(comments))
}

/// Comment on a post
///
/// POST /posts/{post_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentThreadResponse>>> {
    let comment = CommentService::new(state.service_context())
        .create_comment(auth.user_id, post_id, request)
        .await?;
    Ok(Created(Json(comment)))
}

/// Reply to a comment
///
/// POST /comments/{comment_id}/responses
pub async fn create_comment_response(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<ReplyResponse>>> {
    let reply = CommentService::new(state.service_context())
        .create_comment_response(auth.user_id, comment_id, request)
        .await?;
    Ok(Created(Json(reply)))
}
