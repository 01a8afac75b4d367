//! Reaction handlers

use axum::{extract::State, Json};
use feed_service::dto::{ReactionRequest, ReactionResponse};
use feed_service::EngagementService;

use crate::extractors::{AuthUser, IdPath, JsonBody};
use crate::response::ApiResult;
use crate::state::AppState;

/// Like or dislike a post
///
/// PUT /posts/{post_id}/reaction
pub async fn put_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
    JsonBody(request): JsonBody<ReactionRequest>,
) -> ApiResult<Json<ReactionResponse>> {
    let response = EngagementService::new(state.service_context())
        .apply_reaction(post_id, auth.user_id, request)
        .await?;
    Ok(Json(response))
}
