//! # feed-core
//!
//! Domain layer containing entities, value objects, repository traits, the
//! reaction rules and the similarity recommender.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod engagement;
pub mod entities;
pub mod error;
pub mod recommendation;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use engagement::{CounterDelta, ReactionResult, ReactionTransition};
pub use entities::{
    Comment, CommentResponse, NewComment, NewCommentResponse, NewPost, NewSubscription, NewUser,
    Post, PostChanges, Reaction, ReactionCounts, Subscription, User,
};
pub use error::DomainError;
pub use recommendation::{
    build_similarity_matrix, recommend, CorpusDocument, Recommendation, SimilarityMatrix,
};
pub use traits::{
    CommentRepository, IdentityProvider, PostRepository, ReactionRepository, RepoResult,
    SubscriptionRepository, UserRepository,
};
pub use value_objects::{EntityId, EntityIdParseError, ReactionKind, ReactionKindParseError};
