//! Post entity <-> model mapper

use feed_core::entities::{Post, ReactionCounts};
use feed_core::value_objects::EntityId;

use crate::models::{PostCountersModel, PostModel};

/// Convert PostModel to Post entity
impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: EntityId::new(model.id),
            author_id: EntityId::new(model.author_id),
            title: model.title,
            description: model.description,
            like_count: model.like_count,
            dislike_count: model.dislike_count,
            view_count: model.view_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl PostCountersModel {
    pub fn counts(&self) -> ReactionCounts {
        ReactionCounts {
            likes: self.like_count,
            dislikes: self.dislike_count,
        }
    }
}
