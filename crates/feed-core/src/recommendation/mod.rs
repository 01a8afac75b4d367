//! Content-based recommendations
//!
//! `build_similarity_matrix` turns a corpus snapshot into pairwise TF-IDF
//! cosine scores; `recommend` picks related posts from it.

mod matrix;
mod selector;
mod tfidf;

pub use matrix::{build_similarity_matrix, CorpusDocument, SimilarityMatrix};
pub use selector::{recommend, Recommendation, RECOMMENDATION_LIMIT};
pub use tfidf::{cosine_similarity, tokenize, SparseVector, TfIdfModel};
