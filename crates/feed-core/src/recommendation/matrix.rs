//! Similarity matrix over a post corpus snapshot

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::tfidf::{cosine_similarity, TfIdfModel};
use crate::error::DomainError;
use crate::value_objects::EntityId;

/// One post's contribution to the corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusDocument {
    pub post_id: EntityId,
    pub text: String,
}

impl CorpusDocument {
    pub fn new(post_id: EntityId, text: impl Into<String>) -> Self {
        Self {
            post_id,
            text: text.into(),
        }
    }
}

/// Immutable pairwise similarity scores.
///
/// Row and column `i` belong to `post_ids()[i]`. Scores lie in `[0, 1]`, the
/// matrix is symmetric and the diagonal is `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    post_ids: Vec<EntityId>,
    positions: HashMap<EntityId, usize>,
    scores: Vec<Vec<f64>>,
    built_at: DateTime<Utc>,
}

impl SimilarityMatrix {
    /// Matrix over an empty corpus
    pub fn empty() -> Self {
        Self {
            post_ids: Vec::new(),
            positions: HashMap::new(),
            scores: Vec::new(),
            built_at: Utc::now(),
        }
    }

    /// Wrap precomputed scores.
    ///
    /// `rows` must be square and match `post_ids` in length; ids must be
    /// unique.
    pub fn from_rows(post_ids: Vec<EntityId>, rows: Vec<Vec<f64>>) -> Result<Self, DomainError> {
        let n = post_ids.len();
        if rows.len() != n || rows.iter().any(|row| row.len() != n) {
            return Err(DomainError::ValidationError(format!(
                "similarity matrix must be {n}x{n}"
            )));
        }
        let positions: HashMap<EntityId, usize> = post_ids
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, index))
            .collect();
        if positions.len() != n {
            return Err(DomainError::ValidationError(
                "similarity matrix post ids must be unique".to_string(),
            ));
        }
        Ok(Self {
            post_ids,
            positions,
            scores: rows,
            built_at: Utc::now(),
        })
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.post_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.post_ids.is_empty()
    }

    /// A matrix with fewer than two rows cannot rank anything
    pub fn is_trivial(&self) -> bool {
        self.len() < 2
    }

    /// Snapshot ordering of the corpus
    pub fn post_ids(&self) -> &[EntityId] {
        &self.post_ids
    }

    /// Row/column index of a post in the snapshot
    pub fn position_of(&self, post_id: EntityId) -> Option<usize> {
        self.positions.get(&post_id).copied()
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.scores.get(index).map(Vec::as_slice)
    }

    pub fn score(&self, i: usize, j: usize) -> Option<f64> {
        self.scores.get(i).and_then(|row| row.get(j)).copied()
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Age of the matrix relative to `now`
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.built_at
    }
}

/// Build the TF-IDF cosine similarity matrix for a corpus snapshot.
///
/// Infallible: an empty corpus yields an empty matrix and documents without
/// terms only match themselves.
pub fn build_similarity_matrix(corpus: &[CorpusDocument]) -> SimilarityMatrix {
    let n = corpus.len();
    if n == 0 {
        return SimilarityMatrix::empty();
    }

    let texts: Vec<&str> = corpus.iter().map(|doc| doc.text.as_str()).collect();
    let model = TfIdfModel::fit(&texts);
    let vectors = model.vectors();

    let mut scores = vec![vec![0.0; n]; n];
    for i in 0..n {
        scores[i][i] = 1.0;
        for j in (i + 1)..n {
            let score = cosine_similarity(&vectors[i], &vectors[j]).clamp(0.0, 1.0);
            scores[i][j] = score;
            scores[j][i] = score;
        }
    }

    let post_ids: Vec<EntityId> = corpus.iter().map(|doc| doc.post_id).collect();
    let positions = post_ids
        .iter()
        .enumerate()
        .map(|(index, id)| (*id, index))
        .collect();

    SimilarityMatrix {
        post_ids,
        positions,
        scores,
        built_at: Utc::now(),
    }
}
