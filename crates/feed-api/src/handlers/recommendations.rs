//! Recommendation handlers

use axum::{extract::State, Json};
use feed_service::dto::RecommendationResponse;
use feed_service::RecommendationService;

use crate::extractors::IdPath;
use crate::response::ApiResult;
use crate::state::AppState;

/// Posts related to a post
///
/// GET /posts/{post_id}/recommendations
pub async fn get_recommendations(
    State(state): State<AppState>,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<RecommendationResponse>> {
    let response = RecommendationService::new(state.service_context())
        .recommend(post_id)
        .await?;
    Ok(Json(response))
}
