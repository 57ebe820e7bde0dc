//! Structured logging with box-drawing output.
//!
//! daylightr reports read as one visual block per run: a version header, blocks of
//! related lines joined by a vertical pipe, and a terminal marker.
//!
//! ## Logging Conventions
//!
//! - **`log_block_start!`**: starts a new conceptual block (`┃` spacer, then `┣ message`).
//! - **`log_decorated!`**: a line inside the current block (`┣ message`).
//! - **`log_indented!`**: nested detail under the previous line (`┃   message`).
//! - **`log_pipe!`**: a lone `┃` for spacing before a semantic message.
//! - **`log_version!`**: the startup header, `┏ daylightr vX.Y.Z ━━╸`.
//! - **`log_end!`**: the closing `╹`.
//! - **`log_info!`, `log_warning!`, `log_error!`**: semantic lines with a colored
//!   `[LEVEL]` tag.
//! - **`log_debug!`**: like the semantic macros, but only printed after
//!   [`Log::set_debug`] turned debug output on (the `--debug` flag).
//!
//! Output can be switched off entirely with [`Log::set_enabled`]; the JSON output
//! modes do this so stdout stays machine readable.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Global switches for the logging macros.
pub struct Log;

impl Log {
    /// Enable or disable all log output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Enable or disable `log_debug!` output.
    pub fn set_debug(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_debug() -> bool {
        Self::is_enabled() && DEBUG_ENABLED.load(Ordering::SeqCst)
    }

    /// Date prefix shown while the clock is pinned with `--date`, empty otherwise.
    pub fn get_timestamp_prefix() -> String {
        if crate::time_source::is_initialized() && crate::time_source::is_pinned() {
            format!("[{}] ", crate::time_source::now().format("%Y-%m-%d"))
        } else {
            String::new()
        }
    }
}

/// Write already formatted text to stdout.
fn write_output(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

/// Prefix every line of `lines` with the timestamp prefix and write it.
#[doc(hidden)]
pub fn emit(lines: &[&str]) {
    let prefix = Log::get_timestamp_prefix();
    let mut out = String::new();
    for line in lines {
        out.push_str(&prefix);
        out.push_str(line);
        out.push('\n');
    }
    write_output(&out);
}

// # Logging Macros

#[doc(hidden)]
#[macro_export]
macro_rules! __log_with {
    ($lead:expr, $fmt:literal $($arg:tt)*) => {{
        if $crate::logger::Log::is_enabled() {
            let message = format!($fmt $($arg)*);
            $crate::logger::emit(&[&format!("{}{}", $lead, message)]);
        }
    }};
    ($lead:expr, $expr:expr) => {{
        if $crate::logger::Log::is_enabled() {
            let expr = $expr;
            $crate::logger::emit(&[&format!("{}{}", $lead, expr)]);
        }
    }};
}

/// Log a line inside the current block.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)+) => { $crate::__log_with!("┣ ", $($arg)+) };
}

/// Log nested detail under the previous line.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)+) => { $crate::__log_with!("┃   ", $($arg)+) };
}

/// Log a lone pipe for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::emit(&["┃"]);
        }
    }};
}

/// Start a new block, separated from the previous one by a pipe.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)+) => {{
        $crate::log_pipe!();
        $crate::__log_with!("┣ ", $($arg)+)
    }};
}

/// Log the application version header.
#[macro_export]
macro_rules! log_version {
    () => {{
        if $crate::logger::Log::is_enabled() {
            let header = format!("┏ daylightr v{} ━━╸", env!("CARGO_PKG_VERSION"));
            $crate::logger::emit(&[&header]);
        }
    }};
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::emit(&["╹"]);
        }
    }};
}

/// Log a warning with a yellow tag.
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)+) => { $crate::__log_with!("┣[\x1b[33mWARNING\x1b[0m] ", $($arg)+) };
}

/// Log an error with a red tag.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => { $crate::__log_with!("┣[\x1b[31mERROR\x1b[0m] ", $($arg)+) };
}

/// Log an error that ends the run, closing the block with a corner.
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)+) => {{
        $crate::log_pipe!();
        $crate::__log_with!("┗[\x1b[31mERROR\x1b[0m] ", $($arg)+)
    }};
}

/// Log an informational line with a green tag.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => { $crate::__log_with!("┣[\x1b[32mINFO\x1b[0m] ", $($arg)+) };
}

/// Log a debug line; silent unless debug output is on.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {{
        if $crate::logger::Log::is_debug() {
            $crate::__log_with!("┣[\x1b[36mDEBUG\x1b[0m] ", $($arg)+)
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_debug_requires_logging_enabled() {
        Log::set_enabled(true);
        Log::set_debug(true);
        assert!(Log::is_debug());

        Log::set_enabled(false);
        assert!(!Log::is_debug());

        Log::set_enabled(true);
        Log::set_debug(false);
        assert!(!Log::is_debug());
    }

    #[test]
    #[serial]
    fn test_macros_accept_literals_and_expressions() {
        Log::set_enabled(false);
        let value = 42;
        log_decorated!("value {value}");
        log_indented!(format!("value {}", value));
        log_block_start!("block");
        log_warning!("careful {}", value);
        log_debug!("hidden");
        log_pipe!();
        log_end!();
        Log::set_enabled(true);
    }
}
