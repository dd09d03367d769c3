use clap::Parser;
use std::path::PathBuf;

use tag_move::cli::Args;
use tag_move::config::{Config, LogLevel};

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["tag_move", "--debug", "--log-level", "quiet"]);
    let lvl = args.effective_log_level().unwrap();
    assert_eq!(lvl, LogLevel::Debug); // --debug wins

    let args = Args::parse_from(["tag_move", "--log-level", "info"]);
    let lvl = args.effective_log_level().unwrap();
    assert_eq!(lvl, LogLevel::Info);
}

#[test]
fn apply_overrides_sets_fields() {
    let args = Args::parse_from([
        "tag_move",
        "/photos/in",
        "--dest-root",
        "/photos/people",
        "--history-capacity",
        "7",
        "--exiftool",
        "/opt/exiftool",
        "--log-level",
        "info",
        "--dry-run",
    ]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.source_base, PathBuf::from("/photos/in"));
    assert_eq!(cfg.dest_root, PathBuf::from("/photos/people"));
    assert_eq!(cfg.history_capacity, 7);
    assert_eq!(cfg.exiftool, PathBuf::from("/opt/exiftool"));
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert!(cfg.dry_run);
}

#[test]
fn unset_flags_leave_config_alone() {
    let args = Args::parse_from(["tag_move"]);
    let mut cfg = Config::default();
    let before = cfg.clone();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.source_base, before.source_base);
    assert_eq!(cfg.dest_root, before.dest_root);
    assert_eq!(cfg.history_capacity, before.history_capacity);
    assert_eq!(cfg.log_level, before.log_level);
    assert!(!cfg.dry_run);
}

#[test]
fn log_level_names_parse() {
    assert_eq!(LogLevel::parse("QUIET"), Some(LogLevel::Quiet));
    assert_eq!(LogLevel::parse("verbose"), Some(LogLevel::Info));
    assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Debug));
    assert_eq!(LogLevel::parse("bogus"), None);
}
