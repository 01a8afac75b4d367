//! Recommendation selector
//!
//! Ranks a target post's neighbours by similarity, or samples random posts
//! when the similarity data cannot answer the request.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use super::matrix::SimilarityMatrix;
use crate::entities::Post;
use crate::value_objects::EntityId;

/// Number of related posts returned per request
pub const RECOMMENDATION_LIMIT: usize = 3;

/// Related posts together with how they were chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    /// Most similar posts first
    SimilarityRanked(Vec<Post>),
    /// Uniform random sample, similarity data unusable
    RandomFallback(Vec<Post>),
}

impl Recommendation {
    /// Wire name of the strategy used
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::SimilarityRanked(_) => "similarity",
            Self::RandomFallback(_) => "random",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::RandomFallback(_))
    }

    pub fn posts(&self) -> &[Post] {
        match self {
            Self::SimilarityRanked(posts) | Self::RandomFallback(posts) => posts,
        }
    }

    pub fn into_posts(self) -> Vec<Post> {
        match self {
            Self::SimilarityRanked(posts) | Self::RandomFallback(posts) => posts,
        }
    }
}

/// Pick up to `limit` posts related to `target`.
///
/// The result never contains the target and never repeats a post. Ranked ids
/// that are missing from `corpus` (deleted since the matrix was built) are
/// skipped. Equal scores keep snapshot order.
pub fn recommend<R: Rng + ?Sized>(
    target: EntityId,
    matrix: Option<&SimilarityMatrix>,
    corpus: &[Post],
    limit: usize,
    rng: &mut R,
) -> Recommendation {
    if let Some(ranked) = matrix.and_then(|m| rank_by_similarity(target, m, corpus, limit)) {
        return Recommendation::SimilarityRanked(ranked);
    }

    let eligible: Vec<&Post> = corpus.iter().filter(|post| post.id != target).collect();
    let sample = eligible
        .choose_multiple(rng, limit.min(eligible.len()))
        .map(|post| (*post).clone())
        .collect();
    Recommendation::RandomFallback(sample)
}

fn rank_by_similarity(
    target: EntityId,
    matrix: &SimilarityMatrix,
    corpus: &[Post],
    limit: usize,
) -> Option<Vec<Post>> {
    if matrix.is_trivial() {
        return None;
    }
    let position = matrix.position_of(target)?;
    let row = matrix.row(position)?;

    let mut candidates: Vec<(usize, f64)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|(index, _)| *index != position)
        .collect();
    // Stable sort keeps lower snapshot positions first on ties
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

    let by_id: HashMap<EntityId, &Post> = corpus.iter().map(|post| (post.id, post)).collect();
    let ids = matrix.post_ids();

    Some(
        candidates
            .into_iter()
            .filter_map(|(index, _)| by_id.get(&ids[index]))
            .filter(|post| post.id != target)
            .take(limit)
            .map(|post| (*post).clone())
            .collect(),
    )
}
