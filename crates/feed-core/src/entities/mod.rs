//! Domain entities - core business objects

mod comment;
mod post;
mod reaction;
mod subscription;
mod user;

pub use comment::{Comment, CommentResponse, NewComment, NewCommentResponse, MAX_COMMENT_LENGTH};
pub use post::{
    NewPost, Post, PostChanges, ReactionCounts, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH,
};
pub use reaction::Reaction;
pub use subscription::{NewSubscription, Subscription};
pub use user::{NewUser, User};
