//! Best score record
//!
//! A single integer persisted under a fixed key. Anything unreadable
//! counts as zero, and a failed write never touches the run.

use crate::persistence::KeyValueStore;

/// Store key for the best score
pub const BEST_SCORE_KEY: &str = "jet_gates_best";

/// Best score, cached in memory and written through to a store
#[derive(Debug)]
pub struct BestScore<S: KeyValueStore> {
    best: u64,
    store: S,
}

impl<S: KeyValueStore> BestScore<S> {
    /// Read the best score; absent or negative reads as zero
    pub fn load(store: S) -> Self {
        let best = store
            .get(BEST_SCORE_KEY)
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(0);
        Self { best, store }
    }

    pub fn get(&self) -> u64 {
        self.best
    }

    /// Check if a score would beat the record
    pub fn beats(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run. Returns true if it set a new best.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.beats(score) {
            return false;
        }
        self.best = score;
        let value = i64::try_from(score).unwrap_or(i64::MAX);
        if let Err(e) = self.store.set(BEST_SCORE_KEY, value) {
            log::warn!("Could not save best score {}: {}", score, e);
        }
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
