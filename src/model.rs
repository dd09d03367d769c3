//! Core data model for the move engine.
//! Items come from the caller (scanner or UI list); records and batches are
//! produced by the engine and owned by its history.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// A candidate file to relocate. Owned by the caller; the engine only reads
/// the `include` flag and the assigned person label.
#[derive(Debug, Clone)]
pub struct MoveItem {
    /// Absolute path of the file to move.
    pub source: PathBuf,
    /// Whether this item participates in the next plan/execute call.
    pub include: bool,
    /// Person label deciding the destination subdirectory. `None` or a
    /// blank string means "skip this item".
    pub person: Option<String>,
}

impl MoveItem {
    pub fn new(source: impl Into<PathBuf>, person: Option<String>) -> Self {
        let person = person.filter(|p| !p.trim().is_empty());
        Self {
            source: source.into(),
            include: person.is_some(),
            person,
        }
    }

    /// Label to act on, if this item is eligible at all.
    pub(crate) fn effective_person(&self) -> Option<&str> {
        if !self.include {
            return None;
        }
        self.person.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }
}

/// One planned or completed move. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: PathBuf,
    pub to: PathBuf,
    pub person: String,
}

impl MoveRecord {
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>, person: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            person: person.into(),
        }
    }
}

/// An executed group of moves sharing one destination root and timestamp.
/// Only the executor creates batches, and only when at least one record
/// succeeded.
#[derive(Debug, Clone)]
pub struct MoveBatch {
    pub records: Vec<MoveRecord>,
    pub dest_root: PathBuf,
    pub executed_at: DateTime<Utc>,
}

impl MoveBatch {
    pub(crate) fn new(records: Vec<MoveRecord>, dest_root: impl Into<PathBuf>) -> Self {
        debug_assert!(!records.is_empty(), "batches always carry at least one record");
        Self {
            records,
            dest_root: dest_root.into(),
            executed_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A per-item failure: the path it concerns plus a human-readable message
/// suitable for direct display by a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemError {
    pub path: PathBuf,
    pub message: String,
}

impl ItemError {
    pub(crate) fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result of one execute or undo call. Per-item problems land in `errors`;
/// they never abort sibling items and never surface as an `Err`.
#[derive(Debug, Clone, Default)]
pub struct MoveOutcome {
    pub moved: Vec<MoveRecord>,
    pub errors: Vec<ItemError>,
}

impl MoveOutcome {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Single fatal-precondition outcome (destination root unusable).
    pub(crate) fn fatal(path: &Path, message: impl Into<String>) -> Self {
        Self {
            moved: Vec::new(),
            errors: vec![ItemError::new(path, message)],
        }
    }
}
