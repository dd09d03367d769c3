//! Batch reversal.
//!
//! Single-level, non-redoable: a popped batch is consumed even when some or
//! all of its records fail to reverse; recovering from that means re-running
//! a scan and move, never replaying history.

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::model::{ItemError, MoveBatch, MoveOutcome, MoveRecord};
use crate::naming::unique_path;

use super::transfer::{move_by_copy, same_entry};

/// Reverse a batch's records last-moved-first.
pub(super) fn undo_batch(batch: &MoveBatch) -> MoveOutcome {
    let mut outcome = MoveOutcome::default();

    for record in batch.records.iter().rev() {
        let current = record.to.as_path();
        if !current.exists() {
            outcome
                .errors
                .push(ItemError::new(current, "target file missing, cannot undo"));
            continue;
        }

        // A record whose move was itself a no-op (source already in place)
        // reverses to a no-op: the file occupies its own restore path, and
        // probing for a free one would shuffle it onto a numbered name.
        if same_entry(current, &record.from) {
            debug!(path = %current.display(), "record was a no-op, nothing to reverse");
            outcome
                .moved
                .push(MoveRecord::new(current, &record.from, record.person.clone()));
            continue;
        }

        // Restore to the original location unless something unrelated has
        // appeared there since the move; then step aside with a suffix.
        let restore = unique_path(&record.from);

        if let Err(e) = ensure_parent(&restore) {
            outcome
                .errors
                .push(ItemError::new(&restore, format!("create restore directory: {e}")));
            continue;
        }

        match move_by_copy(current, &restore) {
            Ok(()) => {
                info!(from = %current.display(), to = %restore.display(), "undone");
                outcome
                    .moved
                    .push(MoveRecord::new(current, restore, record.person.clone()));
            }
            Err(e) => {
                warn!(path = %current.display(), error = %e, "undo of item failed");
                outcome.errors.push(ItemError::new(current, format!("{e:#}")));
            }
        }
    }

    outcome
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
