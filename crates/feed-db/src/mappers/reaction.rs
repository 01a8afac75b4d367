//! Reaction entity <-> model mapper

use feed_core::entities::Reaction;
use feed_core::error::DomainError;
use feed_core::value_objects::{EntityId, ReactionKind};

use crate::models::ReactionModel;

/// Parse a stored reaction kind
///
/// The column carries a CHECK constraint, so an unknown value means the data
/// was written outside this crate.
pub fn parse_stored_kind(kind: &str) -> Result<ReactionKind, DomainError> {
    kind.parse()
        .map_err(|_| DomainError::InvariantViolation(format!("unknown stored reaction kind: {kind}")))
}

/// Convert ReactionModel to Reaction entity
impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        Ok(Reaction {
            post_id: EntityId::new(model.post_id),
            user_id: EntityId::new(model.user_id),
            kind: parse_stored_kind(&model.kind)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
