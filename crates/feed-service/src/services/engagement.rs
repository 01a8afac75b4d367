//! Engagement service
//!
//! Applies like/dislike transitions, records views and reports thread sizes.

use feed_core::{DomainError, EntityId};
use tracing::{info, instrument};

use crate::dto::{CommentCountResponse, ReactionOnPost, ReactionRequest, ReactionResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Engagement service
pub struct EngagementService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EngagementService<'a> {
    /// Create a new EngagementService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Like or dislike a post on behalf of `user_id`.
    ///
    /// The store reads the current reaction, plans the transition and
    /// commits row and counters as one unit.
    #[instrument(skip(self))]
    pub async fn apply_reaction(
        &self,
        post_id: EntityId,
        user_id: EntityId,
        request: ReactionRequest,
    ) -> ServiceResult<ReactionResponse> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        let result = self
            .ctx
            .reaction_repo()
            .apply_transition(post_id, user_id, request.kind)
            .await?;

        info!(
            post_id = %post_id,
            user_id = %user_id,
            kind = %request.kind,
            likes = result.counts.likes,
            dislikes = result.counts.dislikes,
            "Reaction applied"
        );

        Ok(ReactionResponse::from(ReactionOnPost { post_id, result }))
    }

    /// Count one view and return the new total
    #[instrument(skip(self))]
    pub async fn record_view(&self, post_id: EntityId) -> ServiceResult<i64> {
        Ok(self.ctx.post_repo().increment_views(post_id).await?)
    }

    /// Comments plus comment responses of a post
    #[instrument(skip(self))]
    pub async fn count_comments(&self, post_id: EntityId) -> ServiceResult<CommentCountResponse> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        let comments = self.ctx.comment_repo().count_thread(post_id).await?;
        Ok(CommentCountResponse {
            post_id: post_id.to_string(),
            comments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use feed_core::entities::{NewComment, NewCommentResponse};
    use feed_core::{ReactionCounts, ReactionKind};

    use crate::services::test_support::{seed_post, seed_user, test_context};

    fn like() -> ReactionRequest {
        ReactionRequest {
            kind: ReactionKind::Like,
        }
    }

    fn dislike() -> ReactionRequest {
        ReactionRequest {
            kind: ReactionKind::Dislike,
        }
    }

    #[tokio::test]
    async fn test_first_like_increments_likes_only() {
        let (ctx, _store) = test_context();
        let author = seed_user(&ctx, "author").await;
        let reader = seed_user(&ctx, "reader").await;
        let post = seed_post(&ctx, &author, "react to me").await;

        let response = EngagementService::new(&ctx)
            .apply_reaction(post.id, reader.id, like())
            .await
            .unwrap();
        assert_eq!(response.transition, "created");
        assert_eq!(response.likes, 1);
        assert_eq!(response.dislikes, 0);
    }

    #[tokio::test]
    async fn test_duplicate_reaction_leaves_counters() {
        let (ctx, store) = test_context();
        let author = seed_user(&ctx, "author").await;
        let reader = seed_user(&ctx, "reader").await;
        let post = seed_post(&ctx, &author, "twice").await;
        let service = EngagementService::new(&ctx);

        service.apply_reaction(post.id, reader.id, like()).await.unwrap();
        let err = service
            .apply_reaction(post.id, reader.id, like())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "DUPLICATE_REACTION");
        assert_eq!(err.status_code(), 409);

        let stored = ctx.post_repo().find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(stored.counts(), ReactionCounts { likes: 1, dislikes: 0 });
        assert_eq!(store.reaction_rows(post.id), stored.counts());
    }

    #[tokio::test]
    async fn test_author_cannot_react_to_own_post() {
        let (ctx, _store) = test_context();
        let author = seed_user(&ctx, "author").await;
        let post = seed_post(&ctx, &author, "mine").await;

        let err = EngagementService::new(&ctx)
            .apply_reaction(post.id, author.id, dislike())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "SELF_REACTION_FORBIDDEN");
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_flip_moves_the_counter() {
        let (ctx, store) = test_context();
        let author = seed_user(&ctx, "author").await;
        let reader = seed_user(&ctx, "reader").await;
        let post = seed_post(&ctx, &author, "flip").await;
        let service = EngagementService::new(&ctx);

        service.apply_reaction(post.id, reader.id, like()).await.unwrap();
        let response = service
            .apply_reaction(post.id, reader.id, dislike())
            .await
            .unwrap();
        assert_eq!(response.transition, "changed");
        assert_eq!(response.previous_kind.as_deref(), Some("like"));
        assert_eq!((response.likes, response.dislikes), (0, 1));
        assert_eq!(store.reaction_rows(post.id).total(), 1);
    }

    #[tokio::test]
    async fn test_missing_post_or_user() {
        let (ctx, _store) = test_context();
        let author = seed_user(&ctx, "author").await;
        let post = seed_post(&ctx, &author, "here").await;
        let service = EngagementService::new(&ctx);

        let err = service
            .apply_reaction(EntityId::new(404), author.id, like())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_POST");

        let err = service
            .apply_reaction(post.id, EntityId::new(404), like())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_USER");
    }

    #[tokio::test]
    async fn test_record_view() {
        let (ctx, _store) = test_context();
        let author = seed_user(&ctx, "author").await;
        let post = seed_post(&ctx, &author, "views").await;
        let service = EngagementService::new(&ctx);

        assert_eq!(service.record_view(post.id).await.unwrap(), 1);
        assert_eq!(service.record_view(post.id).await.unwrap(), 2);
        assert!(service.record_view(EntityId::new(404)).await.is_err());
    }

    #[tokio::test]
    async fn test_count_comments_includes_responses() {
        let (ctx, _store) = test_context();
        let author = seed_user(&ctx, "author").await;
        let post = seed_post(&ctx, &author, "thread").await;
        let service = EngagementService::new(&ctx);

        assert_eq!(service.count_comments(post.id).await.unwrap().comments, 0);

        let mut comments = Vec::new();
        for text in ["first", "second"] {
            let comment = ctx
                .comment_repo()
                .create(&NewComment {
                    post_id: post.id,
                    author_id: author.id,
                    text: text.to_string(),
                })
                .await
                .unwrap();
            comments.push(comment);
        }
        for i in 0..3 {
            ctx.comment_repo()
                .create_response(&NewCommentResponse {
                    comment_id: comments[0].id,
                    author_id: author.id,
                    text: format!("reply {i}"),
                })
                .await
                .unwrap();
        }

        assert_eq!(service.count_comments(post.id).await.unwrap().comments, 5);

        let err = service.count_comments(EntityId::new(404)).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_conflicting_reactions() {
        let (ctx, store) = test_context();
        let author = seed_user(&ctx, "author").await;
        let reader = seed_user(&ctx, "reader").await;
        let post = seed_post(&ctx, &author, "contention").await;
        let (post_id, reader_id) = (post.id, reader.id);
        let ctx = Arc::new(ctx);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let ctx = Arc::clone(&ctx);
                let request = if i % 2 == 0 { like() } else { dislike() };
                tokio::spawn(async move {
                    EngagementService::new(&ctx)
                        .apply_reaction(post_id, reader_id, request)
                        .await
                        .is_ok()
                })
            })
            .collect();

        let mut succeeded = 0;
        for handle in handles {
            if handle.await.unwrap() {
                succeeded += 1;
            }
        }
        assert!(succeeded >= 1);

        let rows = ctx.reaction_repo().find_by_post(post.id).await.unwrap();
        assert_eq!(rows.len(), 1);

        let stored = ctx.post_repo().find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(stored.counts(), store.reaction_rows(post.id));
        assert_eq!(stored.counts().get(rows[0].kind), 1);
    }
}
