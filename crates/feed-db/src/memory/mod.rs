//! In-process store implementing every repository trait
//!
//! All tables live behind one mutex, so a reaction transition (read reaction,
//! write reaction, adjust counters) is a single critical section. Used by the
//! service tests, the HTTP integration tests and local runs without Postgres.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tracing::{info, instrument};

use feed_core::engagement::{ReactionResult, ReactionTransition};
use feed_core::entities::{
    Comment, CommentResponse, NewComment, NewCommentResponse, NewPost, NewSubscription, NewUser,
    Post, PostChanges, Reaction, ReactionCounts, Subscription, User,
};
use feed_core::error::DomainError;
use feed_core::traits::{
    CommentRepository, PostRepository, ReactionRepository, RepoResult, SubscriptionRepository,
    UserRepository,
};
use feed_core::value_objects::{EntityId, ReactionKind};

#[derive(Debug, Default)]
struct Sequence(i64);

impl Sequence {
    fn next(&mut self) -> EntityId {
        self.0 += 1;
        EntityId::new(self.0)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    user_ids: Sequence,
    post_ids: Sequence,
    comment_ids: Sequence,
    response_ids: Sequence,
    subscription_ids: Sequence,
    users: BTreeMap<EntityId, User>,
    posts: BTreeMap<EntityId, Post>,
    reactions: HashMap<(EntityId, EntityId), Reaction>,
    comments: BTreeMap<EntityId, Comment>,
    responses: BTreeMap<EntityId, CommentResponse>,
    subscriptions: BTreeMap<EntityId, Subscription>,
}

impl MemoryState {
    fn user_exists(&self, id: EntityId) -> RepoResult<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(DomainError::UserNotFound(id))
        }
    }

    fn sorted_recent(mut posts: Vec<Post>) -> Vec<Post> {
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        posts
    }
}

/// Shared in-memory store; clones share the same tables
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reaction rows for a post, by kind
    pub fn reaction_rows(&self, post_id: EntityId) -> ReactionCounts {
        let state = self.state.lock();
        state
            .reactions
            .values()
            .filter(|r| r.post_id == post_id)
            .fold(ReactionCounts::default(), |mut counts, r| {
                match r.kind {
                    ReactionKind::Like => counts.likes += 1,
                    ReactionKind::Dislike => counts.dislikes += 1,
                }
                counts
            })
    }

    /// Overwrite a post's counters without touching reaction rows.
    ///
    /// Only meant for reproducing drifted data in tests.
    pub fn overwrite_counts(&self, post_id: EntityId, counts: ReactionCounts) -> RepoResult<()> {
        let mut state = self.state.lock();
        let post = state
            .posts
            .get_mut(&post_id)
            .ok_or(DomainError::PostNotFound(post_id))?;
        post.like_count = counts.likes;
        post.dislike_count = counts.dislikes;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<User>> {
        Ok(self.state.lock().users.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[EntityId]) -> RepoResult<Vec<User>> {
        let state = self.state.lock();
        Ok(ids.iter().filter_map(|id| state.users.get(id).cloned()).collect())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let state = self.state.lock();
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let mut state = self.state.lock();
        if state.users.values().any(|u| u.username == user.username) {
            return Err(DomainError::ValidationError(format!(
                "username {} is already taken",
                user.username
            )));
        }
        let created = User {
            id: state.user_ids.next(),
            username: user.username.clone(),
            name: user.name.clone(),
            surname: user.surname.clone(),
            created_at: Utc::now(),
        };
        state.users.insert(created.id, created.clone());
        Ok(created)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Post>> {
        Ok(self.state.lock().posts.get(&id).cloned())
    }

    async fn list_snapshot(&self) -> RepoResult<Vec<Post>> {
        // BTreeMap iterates in id order
        Ok(self.state.lock().posts.values().cloned().collect())
    }

    async fn list_recent(&self) -> RepoResult<Vec<Post>> {
        let posts = self.state.lock().posts.values().cloned().collect();
        Ok(MemoryState::sorted_recent(posts))
    }

    async fn find_by_author(&self, author_id: EntityId) -> RepoResult<Vec<Post>> {
        let posts = self
            .state
            .lock()
            .posts
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        Ok(MemoryState::sorted_recent(posts))
    }

    async fn find_by_authors(&self, author_ids: &[EntityId]) -> RepoResult<Vec<Post>> {
        let posts = self
            .state
            .lock()
            .posts
            .values()
            .filter(|p| author_ids.contains(&p.author_id))
            .cloned()
            .collect();
        Ok(MemoryState::sorted_recent(posts))
    }

    #[instrument(skip(self, post), fields(author_id = %post.author_id))]
    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let mut state = self.state.lock();
        state.user_exists(post.author_id)?;
        let now = Utc::now();
        let created = Post {
            id: state.post_ids.next(),
            author_id: post.author_id,
            title: post.title.clone(),
            description: post.description.clone(),
            like_count: 0,
            dislike_count: 0,
            view_count: 0,
            created_at: now,
            updated_at: now,
        };
        state.posts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: EntityId, changes: &PostChanges) -> RepoResult<Post> {
        let mut state = self.state.lock();
        let post = state.posts.get_mut(&id).ok_or(DomainError::PostNotFound(id))?;
        post.title.clone_from(&changes.title);
        post.description.clone_from(&changes.description);
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.posts.remove(&id).is_none() {
            return Err(DomainError::PostNotFound(id));
        }
        state.reactions.retain(|(post_id, _), _| *post_id != id);
        let removed: Vec<EntityId> = state
            .comments
            .values()
            .filter(|c| c.post_id == id)
            .map(|c| c.id)
            .collect();
        state.comments.retain(|_, c| c.post_id != id);
        state.responses.retain(|_, r| !removed.contains(&r.comment_id));
        Ok(())
    }

    async fn increment_views(&self, id: EntityId) -> RepoResult<i64> {
        let mut state = self.state.lock();
        let post = state.posts.get_mut(&id).ok_or(DomainError::PostNotFound(id))?;
        post.view_count += 1;
        Ok(post.view_count)
    }
}

#[async_trait]
impl ReactionRepository for MemoryStore {
    async fn find(&self, post_id: EntityId, user_id: EntityId) -> RepoResult<Option<Reaction>> {
        Ok(self.state.lock().reactions.get(&(post_id, user_id)).cloned())
    }

    async fn find_by_post(&self, post_id: EntityId) -> RepoResult<Vec<Reaction>> {
        let state = self.state.lock();
        let mut reactions: Vec<Reaction> = state
            .reactions
            .values()
            .filter(|r| r.post_id == post_id)
            .cloned()
            .collect();
        reactions.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.user_id.cmp(&b.user_id)));
        Ok(reactions)
    }

    #[instrument(skip(self))]
    async fn apply_transition(
        &self,
        post_id: EntityId,
        user_id: EntityId,
        requested: ReactionKind,
    ) -> RepoResult<ReactionResult> {
        let mut state = self.state.lock();

        let post = state
            .posts
            .get(&post_id)
            .ok_or(DomainError::PostNotFound(post_id))?;
        let actor_is_author = post.is_author(user_id);
        let current_counts = post.counts();
        state.user_exists(user_id)?;

        let existing = state.reactions.get(&(post_id, user_id)).map(|r| r.kind);
        let transition = ReactionTransition::plan(existing, requested, actor_is_author)?;
        let counts = transition.counter_delta().apply(current_counts)?;

        // Nothing is written before this point, so a rejected plan leaves no trace
        match transition {
            ReactionTransition::Create(kind) => {
                let previous = state
                    .reactions
                    .insert((post_id, user_id), Reaction::new(post_id, user_id, kind));
                if previous.is_some() {
                    return Err(DomainError::InvariantViolation(format!(
                        "second reaction row for post {post_id} user {user_id}"
                    )));
                }
            }
            ReactionTransition::Change { to, .. } => {
                if let Some(reaction) = state.reactions.get_mut(&(post_id, user_id)) {
                    reaction.kind = to;
                    reaction.updated_at = Utc::now();
                }
            }
        }

        if let Some(post) = state.posts.get_mut(&post_id) {
            post.like_count = counts.likes;
            post.dislike_count = counts.dislikes;
        }

        info!(
            kind = %transition.resulting_kind(),
            likes = counts.likes,
            dislikes = counts.dislikes,
            "Reaction transition committed"
        );

        Ok(ReactionResult { transition, counts })
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Comment>> {
        Ok(self.state.lock().comments.get(&id).cloned())
    }

    async fn find_by_post(&self, post_id: EntityId) -> RepoResult<Vec<Comment>> {
        let state = self.state.lock();
        Ok(state
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn find_responses_by_post(&self, post_id: EntityId) -> RepoResult<Vec<CommentResponse>> {
        let state = self.state.lock();
        Ok(state
            .responses
            .values()
            .filter(|r| {
                state
                    .comments
                    .get(&r.comment_id)
                    .is_some_and(|c| c.post_id == post_id)
            })
            .cloned()
            .collect())
    }

    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        let mut state = self.state.lock();
        if !state.posts.contains_key(&comment.post_id) {
            return Err(DomainError::PostNotFound(comment.post_id));
        }
        state.user_exists(comment.author_id)?;
        let created = Comment {
            id: state.comment_ids.next(),
            post_id: comment.post_id,
            author_id: comment.author_id,
            text: comment.text.clone(),
            created_at: Utc::now(),
        };
        state.comments.insert(created.id, created.clone());
        Ok(created)
    }

    async fn create_response(&self, response: &NewCommentResponse) -> RepoResult<CommentResponse> {
        let mut state = self.state.lock();
        if !state.comments.contains_key(&response.comment_id) {
            return Err(DomainError::CommentNotFound(response.comment_id));
        }
        state.user_exists(response.author_id)?;
        let created = CommentResponse {
            id: state.response_ids.next(),
            comment_id: response.comment_id,
            author_id: response.author_id,
            text: response.text.clone(),
            created_at: Utc::now(),
        };
        state.responses.insert(created.id, created.clone());
        Ok(created)
    }

    async fn count_thread(&self, post_id: EntityId) -> RepoResult<i64> {
        let state = self.state.lock();
        let comments = state.comments.values().filter(|c| c.post_id == post_id).count();
        let responses = state
            .responses
            .values()
            .filter(|r| {
                state
                    .comments
                    .get(&r.comment_id)
                    .is_some_and(|c| c.post_id == post_id)
            })
            .count();
        Ok((comments + responses) as i64)
    }
}

#[async_trait]
impl SubscriptionRepository for MemoryStore {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Subscription>> {
        Ok(self.state.lock().subscriptions.get(&id).cloned())
    }

    async fn find_by_subscriber(&self, subscriber_id: EntityId) -> RepoResult<Vec<Subscription>> {
        let state = self.state.lock();
        Ok(state
            .subscriptions
            .values()
            .filter(|s| s.subscriber_id == subscriber_id)
            .cloned()
            .collect())
    }

    async fn find_by_target(&self, user_id: EntityId) -> RepoResult<Vec<Subscription>> {
        let state = self.state.lock();
        Ok(state
            .subscriptions
            .values()
            .filter(|s| s.subscribed_to_id == user_id)
            .cloned()
            .collect())
    }

    #[instrument(skip(self, subscription), fields(
        subscriber_id = %subscription.subscriber_id,
        subscribed_to_id = %subscription.subscribed_to_id,
    ))]
    async fn create(&self, subscription: &NewSubscription) -> RepoResult<Subscription> {
        let mut state = self.state.lock();
        if subscription.is_self() {
            return Err(DomainError::SelfSubscription);
        }
        state.user_exists(subscription.subscriber_id)?;
        state.user_exists(subscription.subscribed_to_id)?;
        let duplicate = state.subscriptions.values().any(|s| {
            s.subscriber_id == subscription.subscriber_id
                && s.subscribed_to_id == subscription.subscribed_to_id
        });
        if duplicate {
            return Err(DomainError::DuplicateSubscription);
        }
        let created = Subscription {
            id: state.subscription_ids.next(),
            subscriber_id: subscription.subscriber_id,
            subscribed_to_id: subscription.subscribed_to_id,
            created_at: Utc::now(),
        };
        state.subscriptions.insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        match self.state.lock().subscriptions.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::SubscriptionNotFound(id)),
        }
    }
}
