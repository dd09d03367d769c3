//! Application orchestrator.
//! Loads/merges config, initializes logging, installs signal handlers,
//! validates paths, scans and extracts, previews the plan, executes, and
//! offers an immediate undo of the batch just executed.
//!
//! History lives in the Engine for the lifetime of the process, so the only
//! point a CLI run can usefully undo is right after its own execute; that is
//! surfaced as an interactive prompt rather than a flag.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use tag_move::output as out;
use tag_move::{
    Engine, ExifToolExtractor, MoveItem, TagMoveError, config, scan, shutdown,
};

use crate::logging::init_tracing;
use tag_move::cli::Args;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        if let Ok(cfg_env) = std::env::var("TAG_MOVE_CONFIG") {
            out::print_info(&format!("Using TAG_MOVE_CONFIG (explicit):\n  {cfg_env}\n"));
            out::print_info("To override, unset TAG_MOVE_CONFIG or set it to another file.");
            return Ok(());
        }
        match config::default_config_path() {
            Some(p) => {
                out::print_info(&format!("Default tag_move config path:\n  {}\n", p.display()));
                if p.exists() {
                    out::print_info("A config file already exists at that location.");
                } else {
                    out::print_info(
                        "No config file exists there yet. Run without --print-config to create a template.",
                    );
                }
            }
            None => out::print_error("Could not determine a default config path"),
        }
        return Ok(());
    }

    // Create template config if none exists (before logging init)
    if let Some(path) = config::ensure_default_config_exists() {
        out::print_success(&format!(
            "A template tag_move config was written to: {}",
            path.display()
        ));
        out::print_info(
            "Edit the file to set `source_base` and `dest_root`, then re-run this command. To use a different location set TAG_MOVE_CONFIG.",
        );
        return Ok(());
    }

    // Build config: file values first, then CLI overrides (CLI wins).
    let mut cfg = config::load_config()?.unwrap_or_default();
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt: Option<tracing_appender::non_blocking::WorkerGuard> =
        init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {e}"));
            e
        })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current step...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
        })
        .expect("failed to install signal handler");
    }

    if shutdown::is_requested() {
        return Ok(());
    }

    debug!("Starting tag_move: {:?}", args);

    let result = run_organize(&args, &cfg);
    if let Err(e) = &result {
        if let Some(tm) = e.downcast_ref::<TagMoveError>() {
            let code = tm.code();
            match tm {
                TagMoveError::SourceBaseInvalid(path) => {
                    error!(code, path = %path.display(), "Source base invalid or not a directory")
                }
                TagMoveError::DestRootUnusable { path, context } => {
                    error!(code, path = %path.display(), %context, "Destination root unusable")
                }
                TagMoveError::ExtractionFailed { path, context } => {
                    error!(code, path = %path.display(), %context, "Metadata extraction failed")
                }
                TagMoveError::Interrupted => error!(code, "Run aborted by user"),
            }
        } else {
            error!(error = ?e, "Run failed");
        }
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn run_organize(args: &Args, cfg: &config::Config) -> Result<()> {
    cfg.validate()?;

    let photos = scan::scan_photos(&cfg.source_base)?;
    if photos.is_empty() {
        out::print_info(&format!(
            "No photos found under '{}'",
            cfg.source_base.display()
        ));
        return Ok(());
    }
    out::print_info(&format!("Scanning {} photo(s) for people tags...", photos.len()));

    let extractor = ExifToolExtractor::new(&cfg.exiftool);
    extractor.verify().map_err(|e| TagMoveError::ExtractionFailed {
        path: cfg.exiftool.clone(),
        context: format!("{e:#}"),
    })?;

    let items: Vec<MoveItem> = scan::build_items(&photos, &extractor);
    if shutdown::is_requested() {
        out::print_warn("Interrupted during scan; nothing was moved.");
        return Err(TagMoveError::Interrupted.into());
    }

    let engine = Engine::new(cfg.history_capacity);
    let plan = engine.plan(&items, &cfg.dest_root);
    if plan.is_empty() {
        out::print_info("No files carry a usable person tag; nothing to do.");
        return Ok(());
    }

    for record in &plan {
        out::print_user(&format!(
            "{} -> {}",
            record.from.display(),
            record.to.display()
        ));
    }

    if cfg.dry_run {
        out::print_info(&format!(
            "Dry-run: {} move(s) planned, nothing was modified. Final names may gain numeric suffixes if the filesystem changes before a real run.",
            plan.len()
        ));
        return Ok(());
    }

    if !args.yes && !confirm(&format!("Move {} file(s)? [y/N] ", plan.len()))? {
        out::print_info("Aborted; nothing was moved.");
        return Ok(());
    }

    let outcome = engine.execute(&items, &cfg.dest_root);
    info!(
        moved = outcome.moved.len(),
        errors = outcome.errors.len(),
        dest = %cfg.dest_root.display(),
        "batch executed"
    );
    out::print_outcome("Moved", &outcome);

    // Offer to reverse the batch while this process (and its history) lives.
    if engine.can_undo()
        && !args.yes
        && atty::is(atty::Stream::Stdin)
        && confirm("Undo this batch? [y/N] ")?
    {
        let undone = engine.undo_last();
        out::print_outcome("Restored", &undone);
    }

    Ok(())
}

/// TTY confirmation; anything but y/yes declines. Non-TTY stdin proceeds
/// (scripted runs already saw the preview; use --dry-run to only preview).
fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(true);
    }
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes"))
}
