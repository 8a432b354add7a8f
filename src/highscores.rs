//! High score tracking
//!
//! Read once when the game is mounted, written only when a run beats it.

use crate::platform::ScoreStore;

/// Best score so far, backed by a [`ScoreStore`]
#[derive(Debug)]
pub struct HighScore<S> {
    best: u32,
    store: S,
}

impl<S: ScoreStore> HighScore<S> {
    /// Load the current best from the store
    pub fn load(store: S) -> Self {
        let best = store.get();
        log::info!("Loaded high score {}", best);
        Self { best, store }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Check if a score would beat the stored best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a finished run's score. Persists and returns true only if it is
    /// strictly greater than the current best.
    pub fn submit(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        self.store.set(score);
        true
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
