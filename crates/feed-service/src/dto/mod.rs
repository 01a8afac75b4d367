//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateCommentRequest, CreatePostRequest, ReactionRequest, SubscribeRequest, UpdatePostRequest,
};

pub use responses::{
    CommentCountResponse, CommentThreadResponse, HealthChecks, HealthResponse, PostSummary,
    ReactionResponse, ReadinessResponse, RecommendationResponse, ReplyResponse,
    SubscriptionResponse,
};

pub use mappers::{
    comment_thread, reply_response, PostWithDetails, ReactionOnPost, SubscriptionWithUsers,
};
