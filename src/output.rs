//! User-facing console output, separate from the tracing log stream.
//! Preview lines and summaries go through here so users can script against
//! them; colors apply only when stdout is a TTY.

use owo_colors::OwoColorize;

use crate::model::MoveOutcome;

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {msg}", "info:".cyan().bold());
    } else {
        println!("info: {msg}");
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {msg}", "warn:".yellow().bold());
    } else {
        eprintln!("warn: {msg}");
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {msg}", "error:".red().bold());
    } else {
        eprintln!("error: {msg}");
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {msg}", "ok:".green().bold());
    } else {
        println!("ok: {msg}");
    }
}

/// Plain unprefixed line, the scriptable output ("A.jpg -> people/Alice/A.jpg").
pub fn print_user(msg: &str) {
    println!("{msg}");
}

/// Summarize an execute/undo outcome: counts first, then one line per error.
pub fn print_outcome(verb: &str, outcome: &MoveOutcome) {
    let line = format!(
        "{verb} {} file(s), {} error(s)",
        outcome.moved.len(),
        outcome.errors.len()
    );
    if outcome.is_clean() {
        print_success(&line);
    } else {
        print_warn(&line);
        for err in &outcome.errors {
            print_error(&format!("{}: {}", err.path.display(), err.message));
        }
    }
}
