//! The copy-then-delete move primitive.
//!
//! Moves are deliberately copy+delete rather than rename so they work across
//! volumes; the price is that they are not atomic. The compensating action
//! when the source delete fails is to remove the fresh copy, leaving the item
//! exactly as it was — never a duplicate in both locations.
//!
//! The destination is created with `create_new` (O_EXCL semantics), so an
//! entry appearing between the uniqueness probe and the write fails the item
//! instead of silently overwriting it.

use anyhow::{Context, Result};
use filetime::FileTime;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

const BUF_SIZE: usize = 1024 * 1024;

/// Copy `src` to `dst` (refusing to clobber), then delete `src`.
///
/// On copy failure nothing was created, so the error is surfaced as-is.
/// On delete failure the copy is removed before the error is returned; the
/// net effect for the caller is "nothing happened for this item".
pub(super) fn move_by_copy(src: &Path, dst: &Path) -> Result<()> {
    copy_no_clobber(src, dst)
        .with_context(|| format!("copy '{}' -> '{}'", src.display(), dst.display()))?;

    if let Err(e) = fs::remove_file(src) {
        // Roll the copy back so the item is untouched on both sides.
        if let Err(cleanup) = fs::remove_file(dst) {
            warn!(
                path = %dst.display(),
                error = %cleanup,
                "failed to remove copy while rolling back; duplicate may remain"
            );
        }
        return Err(e)
            .with_context(|| format!("remove source '{}' after copy", src.display()));
    }

    debug!(src = %src.display(), dst = %dst.display(), "moved by copy+delete");
    Ok(())
}

/// Streamed copy with `create_new` destination semantics. Fsyncs the
/// destination before returning and carries the source mtime over so photos
/// keep their shooting-era timestamps.
fn copy_no_clobber(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;
    let src_meta = src_f.metadata()?;

    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = match io::copy(&mut reader, &mut writer).and_then(|n| {
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(n)
    }) {
        Ok(n) => n,
        Err(e) => {
            // Partial copy: remove the torn destination before reporting.
            drop(writer);
            let _ = fs::remove_file(dst);
            return Err(e);
        }
    };

    // Best-effort mtime preservation; a move never fails over timestamps.
    let mtime = FileTime::from_last_modification_time(&src_meta);
    if let Err(e) = filetime::set_file_mtime(dst, mtime) {
        debug!(path = %dst.display(), error = %e, "could not preserve mtime");
    }

    Ok(bytes)
}

/// True when both paths point at the same filesystem entry, tolerant of
/// non-canonical spellings. Paths that cannot be canonicalized (typically
/// because they do not exist yet) are compared as given.
pub(super) fn same_entry(a: &Path, b: &Path) -> bool {
    let a_real = dunce::canonicalize(a).unwrap_or_else(|_| a.to_path_buf());
    let b_real = dunce::canonicalize(b).unwrap_or_else(|_| b.to_path_buf());
    a_real == b_real
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn move_by_copy_transfers_content_and_removes_source() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.jpg");
        let dst = td.path().join("b.jpg");
        fs::write(&src, b"pixels").unwrap();

        move_by_copy(&src, &dst).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read(&dst).unwrap(), b"pixels");
    }

    #[test]
    fn move_by_copy_refuses_existing_destination() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.jpg");
        let dst = td.path().join("b.jpg");
        fs::write(&src, b"new").unwrap();
        fs::write(&dst, b"old").unwrap();

        let err = move_by_copy(&src, &dst).unwrap_err();
        assert!(format!("{err:#}").contains("copy"));
        // Neither side was touched.
        assert_eq!(fs::read(&src).unwrap(), b"new");
        assert_eq!(fs::read(&dst).unwrap(), b"old");
    }

    #[cfg(unix)]
    #[test]
    fn failed_source_delete_rolls_back_the_copy() {
        use std::os::unix::fs::PermissionsExt;

        let td = tempdir().unwrap();
        let locked = td.path().join("locked");
        fs::create_dir(&locked).unwrap();
        let src = locked.join("a.jpg");
        fs::write(&src, b"pixels").unwrap();
        let dst = td.path().join("b.jpg");

        // A read-only parent blocks the source unlink after the copy lands.
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();
        // Mode bits don't bind a privileged user; nothing to exercise then.
        if fs::remove_file(&src).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let err = move_by_copy(&src, &dst).unwrap_err();
        assert!(format!("{err:#}").contains("remove source"));
        // The item is exactly as it was: source intact, no duplicate copy.
        assert_eq!(fs::read(&src).unwrap(), b"pixels");
        assert!(!dst.exists());

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn same_entry_matches_identical_paths() {
        let td = tempdir().unwrap();
        let p = td.path().join("x.jpg");
        fs::write(&p, b"x").unwrap();
        assert!(same_entry(&p, &p));
        assert!(!same_entry(&p, &td.path().join("y.jpg")));
    }
}
