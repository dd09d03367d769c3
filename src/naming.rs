//! Path-segment naming helpers.
//!
//! Two pure-ish building blocks used by the planner, executor and undo:
//! - `sanitize_person` turns an arbitrary person label into a safe directory
//!   name fragment.
//! - `unique_path` avoids destination collisions by appending " (n)" before
//!   the extension.
//!
//! `unique_path` only reads filesystem state. Callers accept the usual
//! check-then-write race with concurrent external movers: a later create with
//! `create_new` still refuses to clobber, surfacing a per-item error instead.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Fallback directory name when a label sanitizes to nothing.
pub const UNKNOWN_PERSON: &str = "Unknown";

/// Reduce a person label to a filesystem-safe single path segment.
///
/// Keeps Unicode alphanumerics (which covers CJK ideographs), hyphen,
/// underscore, period and space; drops everything else; trims surrounding
/// whitespace. An empty result becomes `"Unknown"`. Total function, no error
/// path.
pub fn sanitize_person(label: &str) -> String {
    let kept: String = label
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ' '))
        .collect();
    let trimmed = kept.trim();
    if trimmed.is_empty() {
        UNKNOWN_PERSON.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Return `candidate` unchanged if nothing exists there, otherwise the first
/// free path of the form "stem (1).ext", "stem (2).ext", ...
///
/// Examples:
/// - "A.jpg"   -> "A (1).jpg", "A (2).jpg", ...
/// - ".hidden" -> ".hidden (1)"
///
/// The counter is unbounded; directories crowded with numbered variants
/// degrade to O(n) existence probes, acceptable for single-user photo
/// batches.
pub fn unique_path(candidate: &Path) -> PathBuf {
    if !candidate.exists() {
        return candidate.to_path_buf();
    }

    // Preserve non-UTF8 names via OsString.
    let stem = candidate
        .file_stem()
        .map(|s| s.to_owned())
        .unwrap_or_else(|| OsString::from("file"));
    let ext = candidate.extension().map(|e| e.to_owned());

    let mut n: u64 = 1;
    loop {
        let mut name = OsString::new();
        name.push(&stem);
        name.push(format!(" ({n})"));
        if let Some(ref e) = ext {
            name.push(".");
            name.push(e);
        }
        let alt = candidate.with_file_name(&name);
        if !alt.exists() {
            return alt;
        }
        if n == 3 {
            trace!(candidate = %candidate.display(), "several name collisions, continuing probe");
        }
        n += 1;
    }
}
