//! Ports implemented by the infrastructure layer

mod identity;
mod repositories;

pub use identity::IdentityProvider;
pub use repositories::{
    CommentRepository, PostRepository, ReactionRepository, RepoResult, SubscriptionRepository,
    UserRepository,
};
