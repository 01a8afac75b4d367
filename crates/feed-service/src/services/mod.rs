//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod comment;
pub mod context;
pub mod engagement;
pub mod error;
pub mod post;
pub mod recommendation;
pub mod similarity_cache;
pub mod subscription;

// Re-export all services for convenience
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use engagement::EngagementService;
pub use error::{ServiceError, ServiceResult};
pub use post::PostService;
pub use recommendation::RecommendationService;
pub use similarity_cache::SimilarityCache;
pub use subscription::SubscriptionService;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use feed_common::{JwtService, RecommendationConfig};
    use feed_core::entities::{NewUser, Post, User};
    use feed_core::EntityId;
    use feed_db::MemoryStore;

    use super::{PostService, ServiceContext};
    use crate::dto::CreatePostRequest;

    pub fn test_context() -> (ServiceContext, MemoryStore) {
        let store = MemoryStore::new();
        let ctx = ServiceContext::in_memory(
            store.clone(),
            Arc::new(JwtService::new("test-secret", 3600)),
            RecommendationConfig {
                cache_ttl_secs: 300,
                limit: 3,
            },
        );
        (ctx, store)
    }

    pub async fn seed_user(ctx: &ServiceContext, username: &str) -> User {
        ctx.user_repo()
            .create(&NewUser {
                username: username.to_string(),
                name: username.to_string(),
                surname: "Tester".to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn seed_post(ctx: &ServiceContext, author: &User, description: &str) -> Post {
        let summary = PostService::new(ctx)
            .create_post(
                author.id,
                CreatePostRequest {
                    title: format!("About {description}"),
                    description: description.to_string(),
                },
            )
            .await
            .unwrap();
        let id: EntityId = summary.id.parse().unwrap();
        ctx.post_repo().find_by_id(id).await.unwrap().unwrap()
    }
}
