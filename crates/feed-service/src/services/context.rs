//! Service context - dependency container for services
//!
//! Holds all repositories, the identity provider and the similarity cache
//! needed by services.

use std::sync::Arc;

use feed_common::RecommendationConfig;
use feed_core::traits::{
    CommentRepository, IdentityProvider, PostRepository, ReactionRepository,
    SubscriptionRepository, UserRepository,
};
use feed_db::{
    MemoryStore, PgCommentRepository, PgPool, PgPostRepository, PgReactionRepository,
    PgSubscriptionRepository, PgUserRepository,
};

use super::error::{ServiceError, ServiceResult};
use super::similarity_cache::SimilarityCache;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories (PostgreSQL or the in-memory store)
/// - The bearer identity provider
/// - The shared similarity matrix cache
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool, absent when running on the in-memory store
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    subscription_repo: Arc<dyn SubscriptionRepository>,

    identity: Arc<dyn IdentityProvider>,
    similarity_cache: Arc<SimilarityCache>,
    recommendation: RecommendationConfig,
}

impl ServiceContext {
    /// Context backed by PostgreSQL repositories sharing `pool`
    pub fn postgres(
        pool: PgPool,
        identity: Arc<dyn IdentityProvider>,
        recommendation: RecommendationConfig,
    ) -> Self {
        Self {
            user_repo: Arc::new(PgUserRepository::new(pool.clone())),
            post_repo: Arc::new(PgPostRepository::new(pool.clone())),
            reaction_repo: Arc::new(PgReactionRepository::new(pool.clone())),
            comment_repo: Arc::new(PgCommentRepository::new(pool.clone())),
            subscription_repo: Arc::new(PgSubscriptionRepository::new(pool.clone())),
            pool: Some(pool),
            identity,
            similarity_cache: Arc::new(SimilarityCache::new()),
            recommendation,
        }
    }

    /// Context backed by a single in-memory store
    pub fn in_memory(
        store: MemoryStore,
        identity: Arc<dyn IdentityProvider>,
        recommendation: RecommendationConfig,
    ) -> Self {
        Self {
            pool: None,
            user_repo: Arc::new(store.clone()),
            post_repo: Arc::new(store.clone()),
            reaction_repo: Arc::new(store.clone()),
            comment_repo: Arc::new(store.clone()),
            subscription_repo: Arc::new(store),
            identity,
            similarity_cache: Arc::new(SimilarityCache::new()),
            recommendation,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if any
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Whether the backing store answers.
    ///
    /// The in-memory store is always healthy.
    pub async fn database_healthy(&self) -> bool {
        match &self.pool {
            Some(pool) => feed_db::ping(pool).await.is_ok(),
            None => true,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the subscription repository
    pub fn subscription_repo(&self) -> &dyn SubscriptionRepository {
        self.subscription_repo.as_ref()
    }

    // === Services ===

    /// Get the bearer identity provider
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.identity.as_ref()
    }

    /// Get the similarity matrix cache
    pub fn similarity_cache(&self) -> &SimilarityCache {
        self.similarity_cache.as_ref()
    }

    /// Get the recommendation settings
    pub fn recommendation_config(&self) -> &RecommendationConfig {
        &self.recommendation
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("recommendation", &self.recommendation)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    subscription_repo: Option<Arc<dyn SubscriptionRepository>>,
    identity: Option<Arc<dyn IdentityProvider>>,
    recommendation: Option<RecommendationConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn subscription_repo(mut self, repo: Arc<dyn SubscriptionRepository>) -> Self {
        self.subscription_repo = Some(repo);
        self
    }

    pub fn identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn recommendation(mut self, config: RecommendationConfig) -> Self {
        self.recommendation = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: self.pool,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            post_repo: self
                .post_repo
                .ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            reaction_repo: self
                .reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            comment_repo: self
                .comment_repo
                .ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            subscription_repo: self
                .subscription_repo
                .ok_or_else(|| ServiceError::validation("subscription_repo is required"))?,
            identity: self
                .identity
                .ok_or_else(|| ServiceError::validation("identity is required"))?,
            similarity_cache: Arc::new(SimilarityCache::new()),
            recommendation: self
                .recommendation
                .ok_or_else(|| ServiceError::validation("recommendation is required"))?,
        })
    }
}
