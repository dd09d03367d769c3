//! Config module: configuration types, default paths, XML loading, and
//! validation of the configured directories.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{create_template_config, ensure_default_config_exists, load_config};

use anyhow::{Context, Result, bail};
use std::fs;
use tracing::{debug, error, info};

use crate::errors::TagMoveError;

/// Defaults used when neither config file nor CLI flags say otherwise.
pub const SOURCE_BASE_DEFAULT: &str = "/srv/photos/inbox";
pub const DEST_ROOT_DEFAULT: &str = "/srv/photos/people";

impl Config {
    /// Validate configured directories for sanity and permissions.
    ///
    /// - source_base must exist, be a directory, and be readable.
    /// - dest_root is created if missing and must be writable.
    /// - the two must not resolve to the same path.
    pub fn validate(&self) -> Result<()> {
        if !self.source_base.exists() || !self.source_base.is_dir() {
            error!("Source base invalid: {}", self.source_base.display());
            return Err(TagMoveError::SourceBaseInvalid(self.source_base.clone()).into());
        }

        // readability probe
        fs::read_dir(&self.source_base).with_context(|| {
            format!(
                "Cannot read source base directory '{}'; check permissions",
                self.source_base.display()
            )
        })?;
        debug!("Source base readable: {}", self.source_base.display());

        if self.dest_root.exists() && !self.dest_root.is_dir() {
            error!("Destination root exists but isn't a directory: {}", self.dest_root.display());
            bail!("Destination root exists but isn't a directory: {}", self.dest_root.display());
        }
        if !self.dest_root.exists() {
            fs::create_dir_all(&self.dest_root).map_err(|e| TagMoveError::DestRootUnusable {
                path: self.dest_root.clone(),
                context: format!("create directory: {e}"),
            })?;
            info!("Created destination root: {}", self.dest_root.display());
        }

        // writability probe: create & remove a small temp file
        let probe = self
            .dest_root
            .join(format!(".tag_move_probe_{}.tmp", std::process::id()));
        match fs::OpenOptions::new().create_new(true).write(true).open(&probe) {
            Ok(_) => {
                let _ = fs::remove_file(&probe);
                debug!("Destination root writable: {}", self.dest_root.display());
            }
            Err(e) => {
                error!("Cannot write to destination root '{}': {}", self.dest_root.display(), e);
                return Err(TagMoveError::DestRootUnusable {
                    path: self.dest_root.clone(),
                    context: format!("write probe failed: {e}. Check directory permissions."),
                }
                .into());
            }
        }

        // ensure the directories are not the same (account for symlinks)
        let src_real =
            dunce::canonicalize(&self.source_base).unwrap_or_else(|_| self.source_base.clone());
        let dst_real =
            dunce::canonicalize(&self.dest_root).unwrap_or_else(|_| self.dest_root.clone());
        if src_real == dst_real {
            error!("Source base and destination root resolve to same path: {}", src_real.display());
            bail!(
                "Source base and destination root must be different paths; both resolve to '{}'",
                src_real.display()
            );
        }

        info!(
            "Config validated: source='{}' dest='{}'",
            self.source_base.display(),
            self.dest_root.display()
        );
        Ok(())
    }
}
