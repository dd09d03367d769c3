//! Photo discovery and item building.
//!
//! A filtered filesystem walk feeds the extractor, which runs across files on
//! the rayon pool (extraction dominates wall time; spawning one external
//! process per file serially is painful on large folders). Result order
//! matches scan order so previews are stable run to run.

use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::extract::Extractor;
use crate::model::MoveItem;
use crate::shutdown;

/// Extensions treated as photos (case-insensitive).
pub const PHOTO_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff", "heic", "webp",
];

fn is_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            PHOTO_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// Walk `root` for photo files, sorted for deterministic previews.
pub fn scan_photos(root: &Path) -> Result<Vec<PathBuf>> {
    let mut photos: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_photo(p))
        .collect();
    photos.sort();
    debug!(root = %root.display(), count = photos.len(), "scanned photos");
    Ok(photos)
}

/// Run the extractor over `photos` and build move items.
///
/// A file with at least one detected person gets that label (first in sorted
/// order when several people were found) and is included; failed or empty
/// extraction leaves the item excluded so the planner skips it. Honors the
/// shutdown flag: remaining files come back unlabelled once an interrupt is
/// requested, and the caller bails before acting on them.
pub fn build_items(photos: &[PathBuf], extractor: &dyn Extractor) -> Vec<MoveItem> {
    photos
        .par_iter()
        .map(|path| {
            if shutdown::is_requested() {
                return MoveItem::new(path, None);
            }
            let person = match extractor.extract(path) {
                Ok(extraction) => {
                    if extraction.people.len() > 1 {
                        debug!(
                            path = %path.display(),
                            people = ?extraction.people,
                            "multiple people tagged, using first"
                        );
                    }
                    extraction.people.into_iter().next()
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "extraction failed, skipping file");
                    None
                }
            };
            MoveItem::new(path, person)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_filter_is_case_insensitive() {
        assert!(is_photo(Path::new("a.JPG")));
        assert!(is_photo(Path::new("b.HeIc")));
        assert!(!is_photo(Path::new("c.txt")));
        assert!(!is_photo(Path::new("noext")));
    }
}
