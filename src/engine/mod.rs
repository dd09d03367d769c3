//! The move/undo transaction engine.
//!
//! One `Engine` instance owns one bounded history. Plan produces a preview
//! without touching the filesystem; execute performs collision-safe
//! copy-then-delete moves and records the batch; undo reverses the most
//! recent batch. History mutation is serialized behind a mutex — the engine
//! is safe to share, but concurrent execute/undo calls queue rather than
//! interleave on history.

mod execute;
mod history;
mod plan;
mod transfer;
mod undo;

pub use history::{DEFAULT_HISTORY_CAPACITY, History};

use std::path::Path;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

use crate::model::{MoveItem, MoveOutcome, MoveRecord};

#[derive(Debug)]
pub struct Engine {
    history: Mutex<History>,
}

impl Engine {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            history: Mutex::new(History::with_capacity(history_capacity)),
        }
    }

    /// Preview the moves a batch would perform. No filesystem mutation;
    /// deterministic and order-preserving for a fixed filesystem state.
    pub fn plan(&self, items: &[MoveItem], dest_root: &Path) -> Vec<MoveRecord> {
        plan::plan(items, dest_root)
    }

    /// Execute a batch of moves into `dest_root`.
    ///
    /// Per-item failures are isolated into `errors`; only an unusable
    /// destination root aborts the call (as a single error entry). A batch
    /// is pushed onto history iff at least one record succeeded.
    pub fn execute(&self, items: &[MoveItem], dest_root: &Path) -> MoveOutcome {
        let outcome = execute::execute(items, dest_root);
        if !outcome.moved.is_empty() {
            let batch = crate::model::MoveBatch::new(outcome.moved.clone(), dest_root);
            debug!(records = batch.len(), dest = %dest_root.display(), "recording batch");
            self.lock_history().push(batch);
        }
        outcome
    }

    /// Undo the most recent batch, reversing records last-moved-first.
    ///
    /// Empty history yields an empty outcome, not an error; check
    /// `can_undo` first for a nicer user message. The popped batch is
    /// consumed regardless of how many records reverse successfully.
    pub fn undo_last(&self) -> MoveOutcome {
        let Some(batch) = self.lock_history().pop_last() else {
            return MoveOutcome::default();
        };
        undo::undo_batch(&batch)
    }

    pub fn can_undo(&self) -> bool {
        self.lock_history().has_any()
    }

    pub fn history_len(&self) -> usize {
        self.lock_history().len()
    }

    // A poisoned lock only means another execute/undo panicked mid-push;
    // the deque itself is still coherent.
    fn lock_history(&self) -> std::sync::MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
