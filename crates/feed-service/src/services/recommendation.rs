//! Recommendation service
//!
//! Serves "related posts" from the cached similarity matrix, building it on
//! the blocking pool when the cache is cold.

use std::sync::Arc;

use feed_core::entities::Post;
use feed_core::{
    build_similarity_matrix, recommend, CorpusDocument, DomainError, EntityId, SimilarityMatrix,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

use crate::dto::RecommendationResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::post::PostService;

/// Recommendation service
pub struct RecommendationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RecommendationService<'a> {
    /// Create a new RecommendationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Posts related to `post_id`
    pub async fn recommend(&self, post_id: EntityId) -> ServiceResult<RecommendationResponse> {
        self.recommend_with_rng(post_id, &mut StdRng::from_entropy())
            .await
    }

    /// Posts related to `post_id`, sampling any fallback from `rng`
    #[instrument(skip(self, rng))]
    pub async fn recommend_with_rng<R: Rng + Send>(
        &self,
        post_id: EntityId,
        rng: &mut R,
    ) -> ServiceResult<RecommendationResponse> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        // Read before the snapshot so an invalidation in between discards the build
        let generation = self.ctx.similarity_cache().generation();
        let corpus = self.ctx.post_repo().list_snapshot().await?;
        let matrix = self.matrix_for(generation, &corpus).await?;

        let limit = self.ctx.recommendation_config().limit;
        let recommendation = recommend(post_id, Some(&matrix), &corpus, limit, rng);
        let strategy = recommendation.strategy();

        debug!(
            post_id = %post_id,
            strategy,
            count = recommendation.posts().len(),
            "Recommendations selected"
        );

        let posts = PostService::new(self.ctx)
            .summarize(recommendation.into_posts())
            .await?;
        Ok(RecommendationResponse { strategy, posts })
    }

    /// Rebuild the matrix from the current corpus and cache it.
    ///
    /// Returns the number of indexed posts.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> ServiceResult<usize> {
        let cache = self.ctx.similarity_cache();
        cache.invalidate();
        let generation = cache.generation();
        let corpus = self.ctx.post_repo().list_snapshot().await?;
        let matrix = self.build_and_cache(generation, &corpus).await?;
        Ok(matrix.len())
    }

    async fn matrix_for(
        &self,
        generation: u64,
        corpus: &[Post],
    ) -> ServiceResult<Arc<SimilarityMatrix>> {
        let ttl = self.ctx.recommendation_config().cache_ttl();
        if let Some(matrix) = self.ctx.similarity_cache().get_fresh(ttl) {
            return Ok(matrix);
        }
        self.build_and_cache(generation, corpus).await
    }

    /// Build from `corpus` and cache the result unless the cache moved past
    /// `generation`, which must be read before `corpus` was loaded.
    async fn build_and_cache(
        &self,
        generation: u64,
        corpus: &[Post],
    ) -> ServiceResult<Arc<SimilarityMatrix>> {
        let cache = self.ctx.similarity_cache();

        let documents: Vec<CorpusDocument> = corpus
            .iter()
            .map(|post| CorpusDocument::new(post.id, post.description.clone()))
            .collect();
        let matrix = tokio::task::spawn_blocking(move || build_similarity_matrix(&documents))
            .await
            .map_err(|e| ServiceError::internal(format!("similarity build failed: {e}")))?;
        let matrix = Arc::new(matrix);

        if !self.ctx.recommendation_config().cache_ttl().is_zero() {
            let stored = cache.store_if_current(generation, Arc::clone(&matrix));
            info!(posts = matrix.len(), stored, "Similarity matrix built");
        }
        Ok(matrix)
    }
}
