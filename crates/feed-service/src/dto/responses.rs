//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Post Responses
// ============================================================================

/// Post with engagement counters and author details
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub likes: i64,
    pub dislikes: i64,
    pub views: i64,
    /// Comments plus comment responses
    pub comments: i64,
    pub author_id: String,
    pub author_username: String,
    pub author_name: String,
    pub author_surname: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Related posts for a post
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    /// `similarity` or `random`
    pub strategy: &'static str,
    pub posts: Vec<PostSummary>,
}

// ============================================================================
// Engagement Responses
// ============================================================================

/// Outcome of a like/dislike request
#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub post_id: String,
    pub kind: String,
    /// `created` or `changed`
    pub transition: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_kind: Option<String>,
    pub likes: i64,
    pub dislikes: i64,
}

/// Thread size of a post
#[derive(Debug, Clone, Serialize)]
pub struct CommentCountResponse {
    pub post_id: String,
    pub comments: i64,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// Reply to a comment
#[derive(Debug, Clone, Serialize)]
pub struct ReplyResponse {
    pub id: String,
    pub comment_id: String,
    pub author_id: String,
    pub author_username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Comment together with its replies
#[derive(Debug, Clone, Serialize)]
pub struct CommentThreadResponse {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub author_username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub responses: Vec<ReplyResponse>,
}

// ============================================================================
// Subscription Responses
// ============================================================================

/// One user following another, with both usernames resolved
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    pub id: String,
    pub subscriber_id: String,
    pub subscriber_username: String,
    pub subscribed_to_id: String,
    pub subscribed_to_username: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
