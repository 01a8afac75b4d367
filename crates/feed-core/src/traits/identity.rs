//! Identity port - resolves an opaque credential to a user

use crate::error::DomainError;
use crate::value_objects::EntityId;

/// Turns a credential presented by a caller into the acting user's id.
///
/// Implementations return `DomainError::Unauthenticated` for anything they
/// cannot verify.
pub trait IdentityProvider: Send + Sync {
    fn authenticate(&self, credential: &str) -> Result<EntityId, DomainError>;
}
