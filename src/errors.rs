//! Typed error definitions for tag_move.
//! Well-known failure modes for better logs and tests; per-item move failures
//! are structured data (`ItemError`) on the outcome instead, never `Err`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagMoveError {
    #[error("Source base invalid or not a directory: {0}")]
    SourceBaseInvalid(PathBuf),

    #[error("Destination root unusable at {path}: {context}")]
    DestRootUnusable { path: PathBuf, context: String },

    #[error("Metadata extraction failed for {path}: {context}")]
    ExtractionFailed { path: PathBuf, context: String },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl TagMoveError {
    /// Stable machine-readable code for structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            TagMoveError::SourceBaseInvalid(_) => "source_base_invalid",
            TagMoveError::DestRootUnusable { .. } => "dest_root_unusable",
            TagMoveError::ExtractionFailed { .. } => "extraction_failed",
            TagMoveError::Interrupted => "interrupted",
        }
    }
}
