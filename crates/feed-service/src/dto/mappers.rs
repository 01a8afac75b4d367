//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use feed_core::engagement::{ReactionResult, ReactionTransition};
use feed_core::entities::{Comment, CommentResponse, Post, Subscription, User};
use feed_core::EntityId;

use super::responses::{
    CommentThreadResponse, PostSummary, ReactionResponse, ReplyResponse, SubscriptionResponse,
};

// ============================================================================
// Post Mappers
// ============================================================================

/// Post joined with what the summary shows next to it
pub struct PostWithDetails<'a> {
    pub post: Post,
    pub author: &'a User,
    pub comments: i64,
}

impl From<PostWithDetails<'_>> for PostSummary {
    fn from(details: PostWithDetails<'_>) -> Self {
        let PostWithDetails {
            post,
            author,
            comments,
        } = details;
        Self {
            id: post.id.to_string(),
            title: post.title,
            description: post.description,
            likes: post.like_count,
            dislikes: post.dislike_count,
            views: post.view_count,
            comments,
            author_id: post.author_id.to_string(),
            author_username: author.username.clone(),
            author_name: author.name.clone(),
            author_surname: author.surname.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

/// Committed reaction on a post
pub struct ReactionOnPost {
    pub post_id: EntityId,
    pub result: ReactionResult,
}

impl From<ReactionOnPost> for ReactionResponse {
    fn from(value: ReactionOnPost) -> Self {
        let ReactionOnPost { post_id, result } = value;
        let (transition, previous_kind) = match result.transition {
            ReactionTransition::Create(_) => ("created", None),
            ReactionTransition::Change { from, .. } => ("changed", Some(from.to_string())),
        };
        Self {
            post_id: post_id.to_string(),
            kind: result.transition.resulting_kind().to_string(),
            transition,
            previous_kind,
            likes: result.counts.likes,
            dislikes: result.counts.dislikes,
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

/// Build the reply DTO, `username` being the reply author's
pub fn reply_response(reply: CommentResponse, username: &str) -> ReplyResponse {
    ReplyResponse {
        id: reply.id.to_string(),
        comment_id: reply.comment_id.to_string(),
        author_id: reply.author_id.to_string(),
        author_username: username.to_string(),
        text: reply.text,
        created_at: reply.created_at,
    }
}

/// Build the comment DTO with its replies attached
pub fn comment_thread(
    comment: Comment,
    username: &str,
    responses: Vec<ReplyResponse>,
) -> CommentThreadResponse {
    CommentThreadResponse {
        id: comment.id.to_string(),
        post_id: comment.post_id.to_string(),
        author_id: comment.author_id.to_string(),
        author_username: username.to_string(),
        text: comment.text,
        created_at: comment.created_at,
        responses,
    }
}

// ============================================================================
// Subscription Mappers
// ============================================================================

/// Subscription with the usernames of both sides
pub struct SubscriptionWithUsers<'a> {
    pub subscription: Subscription,
    pub subscriber: &'a User,
    pub subscribed_to: &'a User,
}

impl From<SubscriptionWithUsers<'_>> for SubscriptionResponse {
    fn from(value: SubscriptionWithUsers<'_>) -> Self {
        let SubscriptionWithUsers {
            subscription,
            subscriber,
            subscribed_to,
        } = value;
        Self {
            id: subscription.id.to_string(),
            subscriber_id: subscription.subscriber_id.to_string(),
            subscriber_username: subscriber.username.clone(),
            subscribed_to_id: subscription.subscribed_to_id.to_string(),
            subscribed_to_username: subscribed_to.username.clone(),
            created_at: subscription.created_at,
        }
    }
}
