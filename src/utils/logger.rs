use colored::Colorize;
use std::env;

pub const DEBUG_ENV: &str = "POWERLINE_SEGMENTS_DEBUG";

pub fn debug_enabled() -> bool {
    env::var_os(DEBUG_ENV).is_some()
}

pub fn debug(message: &str) {
    if debug_enabled() {
        eprintln!("{} {}", "[DEBUG]".dimmed(), message);
    }
}

pub fn debug_with_context(context: &str, message: &str) {
    if debug_enabled() {
        eprintln!("{} {}: {}", "[DEBUG]".dimmed(), context.cyan(), message);
    }
}

/// Always printed; stdout carries the prompt, so warnings go to stderr.
pub fn warn(message: &str) {
    eprintln!("{} {}", "[WARN]".yellow(), message);
}
