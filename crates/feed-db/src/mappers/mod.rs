//! Entity to model mappers
//!
//! Conversions from database models to domain entities (feed-core).
//! Inserts bind entity fields directly, so there are no insert structs.

mod comment;
mod post;
mod reaction;
mod subscription;
mod user;

pub use reaction::parse_stored_kind;
