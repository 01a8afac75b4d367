//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{comments, health, posts, reactions, recommendations, subscriptions};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(post_routes())
        .merge(comment_routes())
        .merge(subscription_routes())
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        // Post CRUD
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route("/posts/@me", get(posts::list_my_posts))
        .route("/posts/subscribed", get(posts::list_subscribed_posts))
        .route(
            "/posts/:post_id",
            get(posts::get_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
        // Engagement
        .route("/posts/:post_id/reaction", put(reactions::put_reaction))
        .route(
            "/posts/:post_id/recommendations",
            get(recommendations::get_recommendations),
        )
        // Comment thread
        .route(
            "/posts/:post_id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/posts/:post_id/comments/count", get(comments::count_comments))
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new().route(
        "/comments/:comment_id/responses",
        post(comments::create_comment_response),
    )
}

/// Subscription routes
fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route("/subscriptions", post(subscriptions::subscribe))
        .route(
            "/subscriptions/:subscription_id",
            delete(subscriptions::unsubscribe),
        )
        .route(
            "/users/:user_id/subscriptions",
            get(subscriptions::list_subscriptions),
        )
        .route(
            "/users/:user_id/subscribers",
            get(subscriptions::list_subscribers),
        )
}
