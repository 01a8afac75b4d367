//! Test fixtures and data generators
//!
//! Provides reusable request bodies and response shapes for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Create / update post request
#[derive(Debug, Serialize)]
pub struct PostRequest {
    pub title: String,
    pub description: String,
}

impl PostRequest {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Reaction request
#[derive(Debug, Serialize)]
pub struct ReactionRequest {
    pub kind: &'static str,
}

impl ReactionRequest {
    pub fn like() -> Self {
        Self { kind: "like" }
    }

    pub fn dislike() -> Self {
        Self { kind: "dislike" }
    }
}

/// Comment request
#[derive(Debug, Serialize)]
pub struct CommentRequest {
    pub text: String,
}

impl CommentRequest {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

/// Post response
#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub likes: i64,
    pub dislikes: i64,
    pub views: i64,
    pub comments: i64,
    pub author_id: String,
    pub author_username: String,
}

/// Reaction response
#[derive(Debug, Deserialize)]
pub struct ReactionResponse {
    pub post_id: String,
    pub kind: String,
    pub transition: String,
    pub previous_kind: Option<String>,
    pub likes: i64,
    pub dislikes: i64,
}

/// Comment count response
#[derive(Debug, Deserialize)]
pub struct CommentCountResponse {
    pub post_id: String,
    pub comments: i64,
}

/// Reply response
#[derive(Debug, Deserialize)]
pub struct ReplyResponse {
    pub id: String,
    pub comment_id: String,
    pub author_username: String,
    pub text: String,
}

/// Comment response with its replies
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author_username: String,
    pub text: String,
    pub responses: Vec<ReplyResponse>,
}

/// Subscribe request
#[derive(Debug, Serialize)]
pub struct SubscribeRequest {
    pub subscribed_to_id: String,
}

impl SubscribeRequest {
    pub fn to(user_id: impl ToString) -> Self {
        Self {
            subscribed_to_id: user_id.to_string(),
        }
    }
}

/// Subscription response
#[derive(Debug, Deserialize)]
pub struct SubscriptionResponse {
    pub id: String,
    pub subscriber_id: String,
    pub subscriber_username: String,
    pub subscribed_to_id: String,
    pub subscribed_to_username: String,
}

/// Recommendation response
#[derive(Debug, Deserialize)]
pub struct RecommendationResponse {
    pub strategy: String,
    pub posts: Vec<PostResponse>,
}
