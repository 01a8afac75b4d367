//! Reaction state machine
//!
//! Per (post, user) pair the state is one of `NoReaction`, `Liked` or
//! `Disliked`. Every pair can always move to the other reaction kind; asking
//! for the kind already held is rejected. The plan produced here is applied
//! by the store inside a single transaction together with the counter update.

use crate::entities::ReactionCounts;
use crate::error::DomainError;
use crate::value_objects::ReactionKind;

/// A validated change of reaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionTransition {
    /// `NoReaction -> kind`
    Create(ReactionKind),
    /// `from -> to`, always with `from != to`
    Change { from: ReactionKind, to: ReactionKind },
}

impl ReactionTransition {
    /// Decide the transition for a request.
    ///
    /// The self-reaction rule only guards the creation of a first reaction.
    pub fn plan(
        existing: Option<ReactionKind>,
        requested: ReactionKind,
        actor_is_author: bool,
    ) -> Result<Self, DomainError> {
        match existing {
            None if actor_is_author => Err(DomainError::ForbiddenSelfReaction),
            None => Ok(Self::Create(requested)),
            Some(current) if current == requested => Err(DomainError::DuplicateReaction),
            Some(current) => Ok(Self::Change {
                from: current,
                to: requested,
            }),
        }
    }

    /// Kind held by the pair once the transition is committed
    pub fn resulting_kind(&self) -> ReactionKind {
        match *self {
            Self::Create(kind) => kind,
            Self::Change { to, .. } => to,
        }
    }

    /// Counter adjustment that keeps the post aggregates equal to the row counts
    pub fn counter_delta(&self) -> CounterDelta {
        match *self {
            Self::Create(kind) => CounterDelta::default().add(kind, 1),
            Self::Change { from, to } => CounterDelta::default().add(from, -1).add(to, 1),
        }
    }
}

/// Signed change to a post's like/dislike counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterDelta {
    pub likes: i64,
    pub dislikes: i64,
}

impl CounterDelta {
    fn add(mut self, kind: ReactionKind, amount: i64) -> Self {
        match kind {
            ReactionKind::Like => self.likes += amount,
            ReactionKind::Dislike => self.dislikes += amount,
        }
        self
    }

    /// Apply to the current counters.
    ///
    /// A negative result means the counters had already drifted from the
    /// reaction rows; that is reported, never clamped.
    pub fn apply(self, counts: ReactionCounts) -> Result<ReactionCounts, DomainError> {
        let next = ReactionCounts {
            likes: counts.likes + self.likes,
            dislikes: counts.dislikes + self.dislikes,
        };
        if next.likes < 0 || next.dislikes < 0 {
            return Err(DomainError::InvariantViolation(format!(
                "reaction counters would become negative (likes={}, dislikes={})",
                next.likes, next.dislikes
            )));
        }
        Ok(next)
    }
}

/// Result of a committed reaction transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionResult {
    pub transition: ReactionTransition,
    pub counts: ReactionCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    use ReactionKind::{Dislike, Like};

    #[test]
    fn test_first_reaction_creates() {
        let t = ReactionTransition::plan(None, Like, false).unwrap();
        assert_eq!(t, ReactionTransition::Create(Like));
        assert_eq!(t.resulting_kind(), Like);
        assert_eq!(t.counter_delta(), CounterDelta { likes: 1, dislikes: 0 });
    }

    #[test]
    fn test_author_cannot_create() {
        let err = ReactionTransition::plan(None, Dislike, true).unwrap_err();
        assert!(matches!(err, DomainError::ForbiddenSelfReaction));
    }

    #[test]
    fn test_same_kind_is_duplicate() {
        for kind in [Like, Dislike] {
            let err = ReactionTransition::plan(Some(kind), kind, false).unwrap_err();
            assert!(matches!(err, DomainError::DuplicateReaction));
        }
    }

    #[test]
    fn test_flip_moves_one_count() {
        let t = ReactionTransition::plan(Some(Like), Dislike, false).unwrap();
        assert_eq!(t, ReactionTransition::Change { from: Like, to: Dislike });
        assert_eq!(t.counter_delta(), CounterDelta { likes: -1, dislikes: 1 });
    }

    #[test]
    fn test_flip_skips_author_rule() {
        let t = ReactionTransition::plan(Some(Dislike), Like, true).unwrap();
        assert_eq!(t.resulting_kind(), Like);
    }

    #[test]
    fn test_delta_apply() {
        let counts = ReactionCounts { likes: 2, dislikes: 0 };
        let next = CounterDelta { likes: -1, dislikes: 1 }.apply(counts).unwrap();
        assert_eq!(next, ReactionCounts { likes: 1, dislikes: 1 });
        assert_eq!(next.total(), counts.total());
    }

    #[test]
    fn test_delta_apply_rejects_negative() {
        let counts = ReactionCounts { likes: 0, dislikes: 0 };
        let err = CounterDelta { likes: -1, dislikes: 1 }.apply(counts).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }
}
