//! Batch execution.
//!
//! Each included item is processed independently; one item's failure never
//! aborts its siblings. Destination paths are recomputed here rather than
//! trusted from an earlier preview, so the executor also tolerates being
//! called without a prior plan.

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::model::{ItemError, MoveItem, MoveOutcome, MoveRecord};
use crate::naming::{sanitize_person, unique_path};

use super::transfer::{move_by_copy, same_entry};

pub(super) fn execute(items: &[MoveItem], dest_root: &Path) -> MoveOutcome {
    // Precondition: the destination root must be usable. Failure here is
    // fatal to the whole call; no per-item processing is attempted.
    if !dest_root.exists() {
        if let Err(e) = fs::create_dir_all(dest_root) {
            warn!(path = %dest_root.display(), error = %e, "destination root unusable");
            return MoveOutcome::fatal(dest_root, format!("create destination root: {e}"));
        }
        info!(path = %dest_root.display(), "created destination root");
    }

    let mut outcome = MoveOutcome::default();

    for item in items {
        // Mirrors the planner's filter; excluded/unlabelled items are silent
        // no-ops, not errors.
        let Some(person) = item.effective_person() else {
            continue;
        };
        let src = item.source.as_path();

        if !src.exists() {
            outcome.errors.push(ItemError::new(src, "source file missing"));
            continue;
        }
        let Some(file_name) = src.file_name() else {
            outcome.errors.push(ItemError::new(src, "source path has no file name"));
            continue;
        };

        let target_dir = dest_root.join(sanitize_person(person));
        let candidate = target_dir.join(file_name);

        // Already in place: success with no I/O. Checked against the raw
        // candidate, before uniqueness, so a file sitting at its own
        // destination is not shuffled onto a numbered name.
        if same_entry(src, &candidate) {
            debug!(path = %src.display(), "source already at destination, no-op");
            outcome.moved.push(MoveRecord::new(src, candidate, person));
            continue;
        }

        if let Err(e) = fs::create_dir_all(&target_dir) {
            outcome
                .errors
                .push(ItemError::new(&target_dir, format!("create person directory: {e}")));
            continue;
        }

        let target = unique_path(&candidate);
        match move_by_copy(src, &target) {
            Ok(()) => {
                info!(src = %src.display(), dest = %target.display(), person, "moved");
                outcome.moved.push(MoveRecord::new(src, target, person));
            }
            Err(e) => {
                warn!(src = %src.display(), error = %e, "item failed");
                outcome.errors.push(ItemError::new(src, format!("{e:#}")));
            }
        }
    }

    outcome
}
