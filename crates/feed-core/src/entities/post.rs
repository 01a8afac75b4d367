//! Post entity - a feed entry with engagement counters

use chrono::{DateTime, Utc};

use crate::value_objects::{EntityId, ReactionKind};

/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

/// Post entity
///
/// `like_count` and `dislike_count` are denormalized aggregates of the
/// reactions table and only change through a reaction transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: EntityId,
    pub author_id: EntityId,
    pub title: String,
    pub description: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Check if the given user wrote this post
    #[inline]
    pub fn is_author(&self, user_id: EntityId) -> bool {
        self.author_id == user_id
    }

    /// Current aggregate reaction counters
    pub fn counts(&self) -> ReactionCounts {
        ReactionCounts {
            likes: self.like_count,
            dislikes: self.dislike_count,
        }
    }
}

/// Values required to insert a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author_id: EntityId,
    pub title: String,
    pub description: String,
}

/// Editable post fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub title: String,
    pub description: String,
}

/// Like/dislike counters of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReactionCounts {
    pub likes: i64,
    pub dislikes: i64,
}

impl ReactionCounts {
    /// Counter for a given kind
    pub fn get(&self, kind: ReactionKind) -> i64 {
        match kind {
            ReactionKind::Like => self.likes,
            ReactionKind::Dislike => self.dislikes,
        }
    }

    /// Total number of reactions
    pub fn total(&self) -> i64 {
        self.likes + self.dislikes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_kind() {
        let counts = ReactionCounts {
            likes: 4,
            dislikes: 1,
        };
        assert_eq!(counts.get(ReactionKind::Like), 4);
        assert_eq!(counts.get(ReactionKind::Dislike), 1);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn test_is_author() {
        let now = Utc::now();
        let post = Post {
            id: EntityId::new(10),
            author_id: EntityId::new(3),
            title: "Hello".to_string(),
            description: "World".to_string(),
            like_count: 0,
            dislike_count: 0,
            view_count: 0,
            created_at: now,
            updated_at: now,
        };
        assert!(post.is_author(EntityId::new(3)));
        assert!(!post.is_author(EntityId::new(4)));
    }
}
