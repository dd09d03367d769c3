//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Creates a commented template if missing (unless TAG_MOVE_CONFIG is set).
//!
//! Unknown XML fields fail the parse (serde deny_unknown_fields) so typos in
//! a config file surface instead of being silently ignored.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use super::{DEST_ROOT_DEFAULT, SOURCE_BASE_DEFAULT};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    source_base: Option<String>,
    dest_root: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    exiftool: Option<String>,
    #[serde(default, deserialize_with = "de_usize_trimmed_opt")]
    history_capacity: Option<usize>,
}

// Custom deserializer that trims surrounding whitespace for optional usize
fn de_usize_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| s.trim().parse::<usize>().ok()))
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|t| !t.is_empty())
}

// Map XmlConfig onto a Config, defaulting unset fields.
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    if let Some(s) = non_blank(parsed.source_base.as_deref()) {
        cfg.source_base = PathBuf::from(s);
    }
    if let Some(s) = non_blank(parsed.dest_root.as_deref()) {
        cfg.dest_root = PathBuf::from(s);
    }
    if let Some(s) = non_blank(parsed.log_file.as_deref()) {
        cfg.log_file = Some(PathBuf::from(s));
    }
    if let Some(s) = non_blank(parsed.exiftool.as_deref()) {
        cfg.exiftool = PathBuf::from(s);
    }
    if let Some(level) = non_blank(parsed.log_level.as_deref()).and_then(LogLevel::parse) {
        cfg.log_level = level;
    }
    if let Some(cap) = parsed.history_capacity {
        cfg.history_capacity = cap;
    }

    cfg
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig =
        from_xml_str(&contents).with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// Load the effective file config, if any.
/// Search order: TAG_MOVE_CONFIG (explicit, errors propagate), then the
/// per-OS default path (missing file is simply "no config").
pub fn load_config() -> Result<Option<Config>> {
    if let Some(p) = env::var_os("TAG_MOVE_CONFIG") {
        let path = PathBuf::from(p);
        let cfg = load_config_from_xml_path(&path)?;
        debug!(path = %path.display(), "loaded config from TAG_MOVE_CONFIG");
        return Ok(Some(cfg));
    }

    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    let cfg = load_config_from_xml_path(&path)?;
    debug!(path = %path.display(), "loaded config from default path");
    Ok(Some(cfg))
}

/// Create default template config file and parent directory.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow::anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/path/to/tag_move.log".into());

    let content = format!(
        "<!--\n  tag_move configuration (XML)\n\n  Fields:\n    source_base       -> directory scanned for incoming tagged photos\n    dest_root         -> root under which per-person folders are created\n    history_capacity  -> executed batches retained for undo (default 20)\n    log_level         -> quiet | normal | info | debug\n    log_file          -> path to log file (optional; stdout still used)\n    exiftool          -> command used to read people/keyword tags\n\n  Notes:\n    - CLI flags override XML values.\n-->\n<config>\n  <source_base>{}</source_base>\n  <dest_root>{}</dest_root>\n  <history_capacity>20</history_capacity>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n  <exiftool>exiftool</exiftool>\n</config>\n",
        SOURCE_BASE_DEFAULT, DEST_ROOT_DEFAULT, suggested_log
    );

    fs::write(path, content)?;
    info!("Created template config at {}", path.display());
    Ok(())
}

/// Create the default config if TAG_MOVE_CONFIG is not set and none exists;
/// return the created path so the CLI can tell the user where it went.
pub fn ensure_default_config_exists() -> Option<PathBuf> {
    if env::var_os("TAG_MOVE_CONFIG").is_some() {
        return None;
    }

    let cfg_path = default_config_path()?;
    if cfg_path.exists() {
        return None;
    }

    match create_template_config(&cfg_path) {
        Ok(()) => Some(cfg_path),
        Err(e) => {
            eprintln!(
                "Failed to create template config at {}: {}",
                cfg_path.display(),
                e
            );
            None
        }
    }
}
