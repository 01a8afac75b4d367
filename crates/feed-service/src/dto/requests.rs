//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use feed_core::{EntityId, ReactionKind};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Description must be 1-10000 characters"))]
    pub description: String,
}

/// Update post request (full replacement of the editable fields)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Description must be 1-10000 characters"))]
    pub description: String,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Like or dislike a post
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReactionRequest {
    pub kind: ReactionKind,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment (or comment response) request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 255, message = "Comment must be 1-255 characters"))]
    pub text: String,
}

// ============================================================================
// Subscription Requests
// ============================================================================

/// Follow another user's posts
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SubscribeRequest {
    pub subscribed_to_id: EntityId,
}
