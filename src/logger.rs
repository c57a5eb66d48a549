//! Structured terminal output for filmlog.
//!
//! Every line filmlog prints goes through the macros in this module so the
//! output keeps one visual shape: a header, pipe-connected blocks, indented
//! details, and a terminal marker.
//!
//! ```text
//! ┏ filmlog v0.4.0 ━━╸
//! ┃
//! ┣ Exposure for EV 6.0
//! ┃   Effective ISO: 400
//! ┃   Shutter: 1/15
//! ╹
//! ```
//!
//! ## Conventions
//!
//! - `log_block_start!` opens a new conceptual block (adds spacing above).
//! - `log_decorated!` continues the current block.
//! - `log_indented!` lists details under the current block.
//! - `log_pipe!` inserts an empty spacer before a semantic message.
//! - `log_info!` and `log_warning!` carry a colored `[LEVEL]` tag.
//! - `log_debug!` only prints when debug output was switched on with
//!   [`Log::set_debug`].
//! - `log_version!` and `log_end!` bracket a whole command's output.
//!
//! Output can be silenced with [`Log::set_enabled`] (tests and library
//! callers that only want the numbers) or redirected to a file with
//! [`Log::start_file_logging`].

use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Sender, channel};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

// Set once when --log is used; all output is then written by the file thread
static LOG_CHANNEL: OnceLock<Sender<LogMessage>> = OnceLock::new();

enum LogMessage {
    Formatted(String),
    Shutdown,
}

/// Process-wide logging switches.
pub struct Log;

impl Log {
    /// Enable or disable all output.
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

    /// Route all further output into `file_path` until the guard is dropped.
    ///
    /// Color codes are stripped from file output. Only one file logger can be
    /// installed per process.
    pub fn start_file_logging(file_path: String) -> anyhow::Result<LoggerGuard> {
        let (tx, rx) = channel();

        LOG_CHANNEL
            .set(tx.clone())
            .map_err(|_| anyhow::anyhow!("Logger channel already initialized"))?;

        let handle = std::thread::spawn(move || {
            let mut file = std::fs::File::create(&file_path)?;

            loop {
                match rx.recv() {
                    Ok(LogMessage::Formatted(text)) => file.write_all(text.as_bytes())?,
                    Ok(LogMessage::Shutdown) | Err(_) => {
                        file.flush()?;
                        break;
                    }
                }
            }

            Ok::<(), anyhow::Error>(())
        });

        Ok(LoggerGuard {
            tx,
            handle: Some(handle),
        })
    }
}

/// Flushes and joins the file logger thread on drop.
pub struct LoggerGuard {
    tx: Sender<LogMessage>,
    handle: Option<std::thread::JoinHandle<anyhow::Result<()>>>,
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(LogMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Remove `ESC [ ... m` color sequences.
fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == 'm' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Write an already formatted line. Public for macro access.
pub fn write_output(text: &str) {
    if let Some(tx) = LOG_CHANNEL.get() {
        let _ = tx.send(LogMessage::Formatted(strip_ansi_codes(text)));
    } else {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }
}

// # Logging Macros

/// Shared body for the line macros: `$shape` receives the message.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_line {
    ($shape:literal, $fmt:literal $($arg:tt)*) => {{
        if $crate::logger::Log::is_enabled() {
            let message = format!($fmt $($arg)*);
            $crate::logger::write_output(&format!($shape, message = message));
        }
    }};
    ($shape:literal, $expr:expr) => {{
        if $crate::logger::Log::is_enabled() {
            let message = $expr;
            $crate::logger::write_output(&format!($shape, message = message));
        }
    }};
}

/// Log a message that continues the current block.
#[macro_export]
macro_rules! log_decorated {
    ($($t:tt)*) => { $crate::__log_line!("┣ {message}\n", $($t)*) };
}

/// Log a detail line under the current block.
#[macro_export]
macro_rules! log_indented {
    ($($t:tt)*) => { $crate::__log_line!("┃   {message}\n", $($t)*) };
}

/// Open a new block with a spacer line above it.
#[macro_export]
macro_rules! log_block_start {
    ($($t:tt)*) => { $crate::__log_line!("┃\n┣ {message}\n", $($t)*) };
}

/// Log a warning with a yellow tag.
#[macro_export]
macro_rules! log_warning {
    ($($t:tt)*) => { $crate::__log_line!("┣[\x1b[33mWARNING\x1b[0m] {message}\n", $($t)*) };
}

/// Log a warning outside of the pipe structure.
#[macro_export]
macro_rules! log_warning_standalone {
    ($($t:tt)*) => { $crate::__log_line!("[\x1b[33mWARNING\x1b[0m] {message}\n", $($t)*) };
}

/// Log an error that terminates the output flow.
#[macro_export]
macro_rules! log_error_exit {
    ($($t:tt)*) => { $crate::__log_line!("┃\n┗[\x1b[31mERROR\x1b[0m] {message}\n", $($t)*) };
}

/// Log an informational message with a green tag.
#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => { $crate::__log_line!("┣[\x1b[32mINFO\x1b[0m] {message}\n", $($t)*) };
}

/// Log a diagnostic message, only when debug output is on.
#[macro_export]
macro_rules! log_debug {
    ($($t:tt)*) => {{
        if $crate::logger::Log::is_debug() {
            $crate::__log_line!("┣[\x1b[32mDEBUG\x1b[0m] {message}\n", $($t)*)
        }
    }};
}

/// Log an empty spacer line.
#[macro_export]
macro_rules! log_pipe {
    () => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::write_output("┃\n");
        }
    }};
}

/// Log the application header.
#[macro_export]
macro_rules! log_version {
    () => {{
        if $crate::logger::Log::is_enabled() {
            let version = env!("CARGO_PKG_VERSION");
            $crate::logger::write_output(&format!("┏ filmlog v{version} ━━╸\n"));
        }
    }};
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {{
        if $crate::logger::Log::is_enabled() {
            $crate::logger::write_output("╹\n");
        }
    }};
}
