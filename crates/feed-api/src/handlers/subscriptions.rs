//! Subscription handlers

use axum::{extract::State, Json};
use feed_service::dto::{SubscribeRequest, SubscriptionResponse};
use feed_service::SubscriptionService;

use crate::extractors::{AuthUser, IdPath, JsonBody};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Follow another user
///
/// POST /subscriptions
pub async fn subscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(request): JsonBody<SubscribeRequest>,
) -> ApiResult<Created<Json<SubscriptionResponse>>> {
    let subscription = SubscriptionService::new(state.service_context())
        .subscribe(auth.user_id, request)
        .await?;
    Ok(Created(Json(subscription)))
}

/// Stop following
///
/// DELETE /subscriptions/{subscription_id}
pub async fn unsubscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(subscription_id): IdPath,
) -> ApiResult<NoContent> {
    SubscriptionService::new(state.service_context())
        .unsubscribe(auth.user_id, subscription_id)
        .await?;
    Ok(NoContent)
}

/// Who the user follows
///
/// GET /users/{user_id}/subscriptions
pub async fn list_subscriptions(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<Vec<SubscriptionResponse>>> {
    let subscriptions = SubscriptionService::new(state.service_context())
        .list_subscriptions(user_id)
        .await?;
    Ok(Json(subscriptions))
}

/// Who follows the user
///
/// GET /users/{user_id}/subscribers
pub async fn list_subscribers(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<Vec<SubscriptionResponse>>> {
    let subscribers = SubscriptionService::new(state.service_context())
        .list_subscribers(user_id)
        .await?;
    Ok(Json(subscribers))
}
