//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod post;
mod reaction;
mod subscription;
mod user;

pub use comment::{CommentModel, CommentResponseModel};
pub use post::{PostCountersModel, PostModel};
pub use reaction::ReactionModel;
pub use subscription::SubscriptionModel;
pub use user::UserModel;
