//! TF-IDF vectorization of post descriptions
//!
//! Tokens are maximal runs of alphanumeric or `_` characters, lower-cased,
//! with at least two characters. Weights are raw term counts scaled by the
//! smoothed inverse document frequency `ln((1 + n) / (1 + df)) + 1`, and every
//! document vector is L2-normalized so that a dot product is a cosine.

use std::collections::{BTreeMap, HashMap};

/// Split free text into lower-cased terms
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect()
}

/// Sparse document vector, entries sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_map(map: BTreeMap<usize, f64>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }

    /// True when the document contained no terms
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product (merge over the sorted term indices)
    pub fn dot(&self, other: &Self) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ti, wi) = self.entries[i];
            let (tj, wj) = other.entries[j];
            match ti.cmp(&tj) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wi * wj;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > f64::EPSILON {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// Cosine similarity of two sparse vectors.
///
/// Returns `0.0` when either vector is zero.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom < f64::EPSILON {
        return 0.0;
    }
    a.dot(b) / denom
}

/// Vocabulary and per-document TF-IDF vectors for one corpus
#[derive(Debug, Clone, Default)]
pub struct TfIdfModel {
    vocabulary: HashMap<String, usize>,
    vectors: Vec<SparseVector>,
}

impl TfIdfModel {
    /// Fit the vocabulary and transform every document in one pass
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> =
            documents.iter().map(|d| tokenize(d.as_ref())).collect();

        // Vocabulary indices follow sorted term order, as a sorted vocabulary would
        let mut terms: Vec<&str> = tokenized
            .iter()
            .flat_map(|tokens| tokens.iter().map(String::as_str))
            .collect();
        terms.sort_unstable();
        terms.dedup();
        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(index, term)| ((*term).to_string(), index))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        let term_counts: Vec<BTreeMap<usize, f64>> = tokenized
            .iter()
            .map(|tokens| {
                let mut counts = BTreeMap::new();
                for token in tokens {
                    *counts.entry(vocabulary[token.as_str()]).or_insert(0.0) += 1.0;
                }
                for term in counts.keys() {
                    document_frequency[*term] += 1;
                }
                counts
            })
            .collect();

        let n = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let vectors = term_counts
            .into_iter()
            .map(|mut counts| {
                for (term, weight) in &mut counts {
                    *weight *= idf[*term];
                }
                let mut vector = SparseVector::from_map(counts);
                vector.normalize();
                vector
            })
            .collect();

        Self {
            vocabulary,
            vectors,
        }
    }

    /// Number of distinct terms
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Document vectors in input order
    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }
}
