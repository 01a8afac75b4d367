//! Reaction entity - a user's like or dislike on a post

use chrono::{DateTime, Utc};

use crate::value_objects::{EntityId, ReactionKind};

/// Reaction entity
///
/// There is at most one reaction per (post, user) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub post_id: EntityId,
    pub user_id: EntityId,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(post_id: EntityId, user_id: EntityId, kind: ReactionKind) -> Self {
        let now = Utc::now();
        Self {
            post_id,
            user_id,
            kind,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if reaction is of a specific kind
    #[inline]
    pub fn is_kind(&self, kind: ReactionKind) -> bool {
        self.kind == kind
    }
}
