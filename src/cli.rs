//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Flags override config values (which are loaded from XML if present).
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};

/// CLI wrapper for the tag_move library.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Sort photos into per-person folders from embedded people tags"
)]
pub struct Args {
    /// Directory scanned for tagged photos (overrides the configured source base).
    #[arg(value_name = "SOURCE_DIR", value_hint = ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Root under which per-person folders are created.
    #[arg(
        long,
        short = 'o',
        value_name = "DIR",
        value_hint = ValueHint::DirPath,
        help = "Destination root for per-person folders"
    )]
    pub dest_root: Option<PathBuf>,

    /// Number of executed batches kept undoable (default 20).
    #[arg(long, value_name = "N", help = "Batches retained for undo")]
    pub history_capacity: Option<usize>,

    /// Preview the plan without touching the filesystem.
    #[arg(long, help = "Show what would be moved, but do not modify files")]
    pub dry_run: bool,

    /// Skip the interactive confirmation (and the undo offer) after preview.
    #[arg(short = 'y', long, help = "Assume yes; do not prompt")]
    pub yes: bool,

    /// Command used to read people/keyword tags from photos.
    #[arg(long, value_name = "CMD", value_hint = ValueHint::CommandName)]
    pub exiftool: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Print where tag_move will look for the config file (or TAG_MOVE_CONFIG
    /// if set), then exit.
    #[arg(long, help = "Print the config file location used by tag_move and exit")]
    pub print_config: bool,

    /// Emit logs in structured JSON.
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(src) = &self.source {
            cfg.source_base = src.clone();
        }
        if let Some(dst) = &self.dest_root {
            cfg.dest_root = dst.clone();
        }
        if let Some(cap) = self.history_capacity {
            cfg.history_capacity = cap;
        }
        if let Some(cmd) = &self.exiftool {
            cfg.exiftool = cmd.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
