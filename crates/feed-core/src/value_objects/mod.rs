//! Value objects - immutable types that represent domain concepts

mod entity_id;
mod reaction_kind;

pub use entity_id::{EntityId, EntityIdParseError};
pub use reaction_kind::{ReactionKind, ReactionKindParseError};
