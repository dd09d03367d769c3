//! Core library for `tag_move`.
//!
//! Organizes photos into per-person directories based on people tags read by
//! an external metadata extractor. The heart of the crate is the move/undo
//! engine: plan a batch without touching the filesystem, execute it with
//! collision-safe naming and copy-then-delete semantics, and keep a bounded
//! history so the most recent batch can be reversed.
//!
//! Guarantees and their limits:
//! - Moves are copy+delete so they work across volumes, at the cost of not
//!   being atomic; a failed source delete is compensated by removing the
//!   fresh copy, never leaving the file in both places.
//! - Destinations are created with no-clobber semantics; a collision gets a
//!   " (n)" suffix, never an overwrite.
//! - Destination paths are recomputed at execution time, so a preview can
//!   differ from the final layout if the filesystem changed in between
//!   (extra numeric suffixes at most).
//! - Undo is single-level per batch and non-redoable; an undone batch is
//!   consumed even when some records fail to reverse.

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod extract;
pub mod model;
pub mod naming;
pub mod output;
pub mod scan;
pub mod shutdown;

pub use config::{Config, LogLevel};
pub use engine::{DEFAULT_HISTORY_CAPACITY, Engine, History};
pub use errors::TagMoveError;
pub use extract::{ExifToolExtractor, Extraction, Extractor};
pub use model::{ItemError, MoveBatch, MoveItem, MoveOutcome, MoveRecord};
pub use naming::{UNKNOWN_PERSON, sanitize_person, unique_path};
