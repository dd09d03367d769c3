//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::paths;
use super::{DEST_ROOT_DEFAULT, SOURCE_BASE_DEFAULT};
use crate::engine::DEFAULT_HISTORY_CAPACITY;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration used by the organizer.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned for incoming tagged photos
    pub source_base: PathBuf,
    /// Root under which per-person directories are created
    pub dest_root: PathBuf,
    /// Number of executed batches retained for undo
    pub history_capacity: usize,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, print the plan but do not modify the filesystem
    pub dry_run: bool,
    /// Command used to extract people/keyword tags
    pub exiftool: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_base: PathBuf::from(SOURCE_BASE_DEFAULT),
            dest_root: PathBuf::from(DEST_ROOT_DEFAULT),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            log_level: LogLevel::Normal,
            // paths::default_log_path() returns Option; best-effort default.
            log_file: paths::default_log_path(),
            dry_run: false,
            exiftool: PathBuf::from("exiftool"),
        }
    }
}

impl Config {
    /// Construct a Config with explicit directories; other fields use defaults.
    pub fn new(source_base: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            source_base: source_base.into(),
            dest_root: dest_root.into(),
            ..Default::default()
        }
    }
}
