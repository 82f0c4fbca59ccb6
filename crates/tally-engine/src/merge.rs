//! Merge coordination: the shared result trie and first-failure capture.

use crate::error::{EngineError, Result};
use parking_lot::Mutex;
use tally_core::KeyTrie;

/// Collects per-worker tries into one shared result under a coarse lock.
///
/// One lock acquisition per worker, so contention scales with worker count
/// rather than record count. Failures land in a single-assignment slot:
/// the first failure wins, later ones are dropped, and other workers run to
/// completion regardless.
pub struct MergeCoordinator {
    result: Mutex<KeyTrie>,
    failure: Mutex<Option<EngineError>>,
}

impl MergeCoordinator {
    pub fn new() -> Self {
        Self {
            result: Mutex::new(KeyTrie::new()),
            failure: Mutex::new(None),
        }
    }

    /// Folds a worker's private trie into the shared result.
    pub fn merge(&self, trie: &KeyTrie) {
        self.result.lock().merge(trie);
    }

    /// Records a worker failure; only the first one is kept.
    pub fn fail(&self, err: EngineError) {
        let mut slot = self.failure.lock();
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    /// Returns true if any worker has reported a failure so far.
    pub fn has_failed(&self) -> bool {
        self.failure.lock().is_some()
    }

    /// Consumes the coordinator after all workers have joined.
    ///
    /// Yields the merged trie, or the first recorded failure; no partial
    /// result escapes on failure.
    pub fn finish(self) -> Result<KeyTrie> {
        if let Some(err) = self.failure.into_inner() {
            return Err(err);
        }
        Ok(self.result.into_inner())
    }
}

impl Default for MergeCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
