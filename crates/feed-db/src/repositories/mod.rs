//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in feed-core.
//! Each repository handles database operations for a specific domain entity.

mod comment;
mod error;
mod post;
mod reaction;
mod subscription;
mod user;

pub use comment::PgCommentRepository;
pub use post::PgPostRepository;
pub use reaction::PgReactionRepository;
pub use subscription::PgSubscriptionRepository;
pub use user::PgUserRepository;
