//! Comment and CommentResponse entities
//!
//! Comments hang off a post and responses hang off a comment. The thread is
//! exactly two levels deep.

use chrono::{DateTime, Utc};

use crate::value_objects::EntityId;

/// Maximum comment / response length in characters
pub const MAX_COMMENT_LENGTH: usize = 255;

/// Top-level comment on a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: EntityId,
    pub post_id: EntityId,
    pub author_id: EntityId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Response to a comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentResponse {
    pub id: EntityId,
    pub comment_id: EntityId,
    pub author_id: EntityId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Values required to insert a comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: EntityId,
    pub author_id: EntityId,
    pub text: String,
}

/// Values required to insert a comment response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommentResponse {
    pub comment_id: EntityId,
    pub author_id: EntityId,
    pub text: String,
}
