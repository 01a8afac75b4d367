//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL or the in-memory store).

use async_trait::async_trait;

use crate::engagement::ReactionResult;
use crate::entities::{
    Comment, CommentResponse, NewComment, NewCommentResponse, NewPost, NewSubscription, NewUser,
    Post, PostChanges, Reaction, Subscription, User,
};
use crate::error::DomainError;
use crate::value_objects::{EntityId, ReactionKind};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<User>>;

    /// Find several users at once, missing ids are ignored
    async fn find_by_ids(&self, ids: &[EntityId]) -> RepoResult<Vec<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> RepoResult<User>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Post>>;

    /// Every post ordered by id ascending (the corpus snapshot order)
    async fn list_snapshot(&self) -> RepoResult<Vec<Post>>;

    /// Every post, newest first
    async fn list_recent(&self) -> RepoResult<Vec<Post>>;

    /// Posts of one author, newest first
    async fn find_by_author(&self, author_id: EntityId) -> RepoResult<Vec<Post>>;

    /// Posts of any of the given authors, newest first
    async fn find_by_authors(&self, author_ids: &[EntityId]) -> RepoResult<Vec<Post>>;

    /// Insert a post with zeroed counters
    async fn create(&self, post: &NewPost) -> RepoResult<Post>;

    /// Replace title and description
    async fn update(&self, id: EntityId, changes: &PostChanges) -> RepoResult<Post>;

    /// Delete a post together with its reactions and comment thread
    async fn delete(&self, id: EntityId) -> RepoResult<()>;

    /// Atomically increment the view counter and return the new value
    async fn increment_views(&self, id: EntityId) -> RepoResult<i64>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Current reaction of a user on a post
    async fn find(&self, post_id: EntityId, user_id: EntityId) -> RepoResult<Option<Reaction>>;

    /// All reactions on a post
    async fn find_by_post(&self, post_id: EntityId) -> RepoResult<Vec<Reaction>>;

    /// Plan and commit a reaction transition.
    ///
    /// Reading the current reaction, writing the new one and adjusting the
    /// post counters happen in one atomic unit that is serialized with every
    /// other transition on the same post.
    async fn apply_transition(
        &self,
        post_id: EntityId,
        user_id: EntityId,
        requested: ReactionKind,
    ) -> RepoResult<ReactionResult>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Comment>>;

    /// Comments on a post, oldest first
    async fn find_by_post(&self, post_id: EntityId) -> RepoResult<Vec<Comment>>;

    /// Responses to any comment of a post, oldest first
    async fn find_responses_by_post(&self, post_id: EntityId) -> RepoResult<Vec<CommentResponse>>;

    /// Insert a comment
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment>;

    /// Insert a response to a comment
    async fn create_response(&self, response: &NewCommentResponse) -> RepoResult<CommentResponse>;

    /// Comments of a post plus the responses to those comments
    async fn count_thread(&self, post_id: EntityId) -> RepoResult<i64>;
}

// ============================================================================
// Subscription Repository
// ============================================================================

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Find subscription by ID
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Subscription>>;

    /// Users followed by `subscriber_id`, oldest first
    async fn find_by_subscriber(&self, subscriber_id: EntityId) -> RepoResult<Vec<Subscription>>;

    /// Followers of `user_id`, oldest first
    async fn find_by_target(&self, user_id: EntityId) -> RepoResult<Vec<Subscription>>;

    /// Insert a subscription.
    ///
    /// Fails with `DuplicateSubscription` if the pair already exists and
    /// `SelfSubscription` if both sides are the same user.
    async fn create(&self, subscription: &NewSubscription) -> RepoResult<Subscription>;

    /// Delete a subscription
    async fn delete(&self, id: EntityId) -> RepoResult<()>;
}
