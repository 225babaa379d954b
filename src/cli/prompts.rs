//! User-facing warnings and prompts for CLI output.
//!
//! Quiet mode suppresses warnings and confirmations; errors always print.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::SeqCst);
}

pub fn quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Skip interactive questions when quiet or when stdin is not a tty.
fn skip_prompt() -> bool {
    quiet() || unsafe { libc::isatty(0) != 1 }
}

pub fn warn(msg: &str) {
    if !quiet() {
        eprintln!("{YELLOW}{msg}{RESET}");
    }
}

pub fn error(msg: &str) {
    eprintln!("{RED}{msg}{RESET}");
}

pub fn urandom_unavailable() {
    warn("Warning: /dev/urandom not available, using hardware entropy");
}

pub fn clipboard_copied(count: usize) {
    if !quiet() {
        println!("*** {count} password(s) COPIED TO CLIPBOARD ***");
    }
}

pub fn clipboard_error(err: &str) {
    eprintln!("Clipboard error: {err}");
}

/// Ask whether to print instead when the clipboard is unavailable.
/// Non-interactive runs fall back silently.
pub fn clipboard_fallback_prompt() -> bool {
    if skip_prompt() {
        return true;
    }

    eprint!("Clipboard unavailable. Print to terminal instead? [Y/n]: ");
    let _ = std::io::stderr().flush();

    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_err() {
        return true;
    }
    match input.trim().to_lowercase().as_str() {
        "" | "y" | "yes" => true,
        _ => {
            eprintln!("Aborted.");
            false
        }
    }
}
