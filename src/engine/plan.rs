//! Move planning: preview without filesystem mutation.

use std::path::Path;

use crate::model::{MoveItem, MoveRecord};
use crate::naming::{sanitize_person, unique_path};

/// Build the proposed records for a batch, in input order.
///
/// Items that are excluded or carry no usable label are skipped silently, as
/// is a source with no final path component; the executor reports the latter
/// as a per-item error, since a preview has no error channel to carry it.
/// `unique_path` only reads, so two planned items aiming at the same
/// destination name will preview the same path; the executor re-resolves at
/// run time and the second lands with a numeric suffix. Filesystem changes
/// between preview and execute can shift final names the same way; preserved
/// behavior, documented rather than "fixed".
pub(super) fn plan(items: &[MoveItem], dest_root: &Path) -> Vec<MoveRecord> {
    let mut records = Vec::new();
    for item in items {
        let Some(person) = item.effective_person() else {
            continue;
        };
        let Some(file_name) = item.source.file_name() else {
            continue;
        };
        let target_dir = dest_root.join(sanitize_person(person));
        let target = unique_path(&target_dir.join(file_name));
        records.push(MoveRecord::new(&item.source, target, person));
    }
    records
}
