//! Metadata extraction boundary.
//!
//! The engine never cares how people tags are produced; it is handed a final
//! label per file. This module defines that boundary as a one-method trait so
//! the scanning stage can be driven by a stub in tests, plus the shipped
//! implementation that shells out to `exiftool`.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// People and keyword tags found in one file. Sets are ordered so label
/// selection downstream is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub people: BTreeSet<String>,
    pub tags: BTreeSet<String>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.tags.is_empty()
    }
}

/// Capability interface for tag extraction. Implementations may fail or
/// return empty results; callers treat both as "no usable label".
pub trait Extractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<Extraction>;
}

// XMP/IPTC fields where photo tools record detected faces and keywords.
const PEOPLE_FIELDS: &[&str] = &["RegionPersonDisplayName", "PersonInImage"];
const TAG_FIELDS: &[&str] = &["Keywords", "Subject"];

/// Extractor backed by an external `exiftool` process (`-j` JSON output).
#[derive(Debug, Clone)]
pub struct ExifToolExtractor {
    command: PathBuf,
}

impl ExifToolExtractor {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Probe the configured binary once so a missing or broken exiftool fails
    /// the run up front instead of warning on every file.
    pub fn verify(&self) -> Result<()> {
        let output = Command::new(&self.command)
            .arg("-ver")
            .output()
            .with_context(|| format!("spawn '{}'", self.command.display()))?;
        if !output.status.success() {
            bail!("'{} -ver' exited with {}", self.command.display(), output.status);
        }
        debug!(
            command = %self.command.display(),
            version = %String::from_utf8_lossy(&output.stdout).trim(),
            "exiftool available"
        );
        Ok(())
    }
}

impl Default for ExifToolExtractor {
    fn default() -> Self {
        Self::new("exiftool")
    }
}

impl Extractor for ExifToolExtractor {
    fn extract(&self, path: &Path) -> Result<Extraction> {
        let output = Command::new(&self.command)
            .arg("-j")
            .args(PEOPLE_FIELDS.iter().map(|f| format!("-{f}")))
            .args(TAG_FIELDS.iter().map(|f| format!("-{f}")))
            .arg(path)
            .output()
            .with_context(|| format!("spawn '{}'", self.command.display()))?;

        if !output.status.success() {
            bail!(
                "exiftool exited with {} for '{}'",
                output.status,
                path.display()
            );
        }

        let extraction = parse_exiftool_json(&output.stdout)
            .with_context(|| format!("parse exiftool output for '{}'", path.display()))?;
        debug!(
            path = %path.display(),
            people = extraction.people.len(),
            tags = extraction.tags.len(),
            "extracted metadata"
        );
        Ok(extraction)
    }
}

/// Parse `exiftool -j` output: a JSON array with one object per file whose
/// tag values are either a single string or an array of strings.
fn parse_exiftool_json(bytes: &[u8]) -> Result<Extraction> {
    let parsed: Value = serde_json::from_slice(bytes).context("invalid JSON")?;
    let Some(entry) = parsed.as_array().and_then(|a| a.first()) else {
        // exiftool prints an empty array for files it cannot read.
        return Ok(Extraction::default());
    };

    let mut extraction = Extraction::default();
    for field in PEOPLE_FIELDS {
        collect_strings(entry.get(*field), &mut extraction.people);
    }
    for field in TAG_FIELDS {
        collect_strings(entry.get(*field), &mut extraction.tags);
    }
    Ok(extraction)
}

fn collect_strings(value: Option<&Value>, into: &mut BTreeSet<String>) {
    match value {
        Some(Value::String(s)) => {
            let s = s.trim();
            if !s.is_empty() {
                into.insert(s.to_string());
            }
        }
        Some(Value::Array(items)) => {
            for item in items {
                collect_strings(Some(item), into);
            }
        }
        _ => {}
    }
}
