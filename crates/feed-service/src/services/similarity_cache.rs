//! Shared similarity matrix cache
//!
//! Holds at most one built matrix. Readers get an `Arc` snapshot, so a
//! rebuild never exposes a half-written matrix.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use feed_core::SimilarityMatrix;

/// Single-slot cache for the corpus similarity matrix.
///
/// Every [`invalidate`](Self::invalidate) bumps a generation counter. A build
/// records the generation it started from and is only stored if nothing
/// invalidated the cache in the meantime.
#[derive(Debug, Default)]
pub struct SimilarityCache {
    slot: RwLock<Option<Arc<SimilarityMatrix>>>,
    generation: AtomicU64,
}

impl SimilarityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached matrix if it is younger than `ttl`. A zero `ttl` never hits.
    pub fn get_fresh(&self, ttl: Duration) -> Option<Arc<SimilarityMatrix>> {
        if ttl.is_zero() {
            return None;
        }
        let slot = self.slot.read();
        let matrix = slot.as_ref()?;
        let age = matrix.age(Utc::now()).to_std().unwrap_or_default();
        (age < ttl).then(|| Arc::clone(matrix))
    }

    /// Generation to hand back to [`store_if_current`](Self::store_if_current)
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Store `matrix` unless the cache was invalidated after `generation`
    /// was read. Returns whether the matrix was stored.
    pub fn store_if_current(&self, generation: u64, matrix: Arc<SimilarityMatrix>) -> bool {
        let mut slot = self.slot.write();
        if self.generation.load(Ordering::Acquire) != generation {
            debug!(generation, "Discarding similarity matrix built from a stale corpus");
            return false;
        }
        *slot = Some(matrix);
        true
    }

    /// Drop the cached matrix and reject builds already in flight
    pub fn invalidate(&self) {
        let mut slot = self.slot.write();
        self.generation.fetch_add(1, Ordering::AcqRel);
        *slot = None;
    }

    pub fn is_populated(&self) -> bool {
        self.slot.read().is_some()
    }
}
