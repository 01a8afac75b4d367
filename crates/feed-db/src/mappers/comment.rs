//! Comment entity <-> model mapper

use feed_core::entities::{Comment, CommentResponse};
use feed_core::value_objects::EntityId;

use crate::models::{CommentModel, CommentResponseModel};

/// Convert CommentModel to Comment entity
impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: EntityId::new(model.id),
            post_id: EntityId::new(model.post_id),
            author_id: EntityId::new(model.author_id),
            text: model.text,
            created_at: model.created_at,
        }
    }
}

/// Convert CommentResponseModel to CommentResponse entity
impl From<CommentResponseModel> for CommentResponse {
    fn from(model: CommentResponseModel) -> Self {
        CommentResponse {
            id: EntityId::new(model.id),
            comment_id: EntityId::new(model.comment_id),
            author_id: EntityId::new(model.author_id),
            text: model.text,
            created_at: model.created_at,
        }
    }
}
