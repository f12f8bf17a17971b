//! Terminal output: the `log!` macro and the watch-mode status line.
//!
//! Build and serve logs go through `log!`, which prints a colored
//! `[tag]` prefix and keeps each line inside the terminal width. Watch
//! mode uses [`WatchStatus`] instead, a one-block status display that
//! repaints itself in place so a long watch session does not scroll
//! rebuild noise down the screen.

use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stdout},
    sync::OnceLock,
};

/// Terminal width in columns, probed once. 120 when probing fails
/// (piped output, dumb terminals).
static COLUMNS: OnceLock<usize> = OnceLock::new();

fn columns() -> usize {
    *COLUMNS.get_or_init(|| size().map_or(120, |(w, _)| w as usize))
}

// ============================================================================
// Log Macro
// ============================================================================

/// Print a log line with a colored `[tag]` prefix.
///
/// ```ignore
/// log!("build"; "{} pages", documents.len());
/// ```
#[macro_export]
macro_rules! log {
    ($tag:expr; $($arg:tt)*) => {{
        $crate::logger::log($tag, &format!($($arg)*))
    }};
}

/// Implementation behind `log!`. Single-line messages are clipped to
/// the terminal width; multi-line payloads (error chains) print whole.
pub fn log(tag: &str, message: &str) {
    let prefix = paint(tag);
    let mut out = stdout().lock();

    execute!(out, Clear(ClearType::UntilNewLine)).ok();

    if message.contains('\n') {
        writeln!(out, "{prefix} {message}").ok();
    } else {
        // "[tag] " occupies the first tag.len() + 3 columns.
        let width = columns().saturating_sub(tag.chars().count() + 3);
        writeln!(out, "{prefix} {}", clip(message, width)).ok();
    }

    out.flush().ok();
}

/// Color a `[tag]` prefix. Tags arrive lowercase from the call sites.
fn paint(tag: &str) -> ColoredString {
    let label = format!("[{tag}]");
    match tag {
        "error" => label.bright_red().bold(),
        "serve" => label.bright_cyan().bold(),
        "watch" => label.bright_green().bold(),
        "init" => label.bright_blue().bold(),
        _ => label.bright_yellow().bold(),
    }
}

/// Cut a message down to at most `max` characters, never splitting a
/// UTF-8 sequence.
fn clip(message: &str, max: usize) -> &str {
    match message.char_indices().nth(max) {
        Some((idx, _)) => &message[..idx],
        None => message,
    }
}

// ============================================================================
// Watch Status
// ============================================================================

/// In-place status block for watch mode.
///
/// Each rebuild outcome replaces the previous one: the block remembers
/// how many rows it painted, moves the cursor back up and clears them
/// before writing again. Every entry carries a dimmed `HH:MM:SS` stamp
/// and a ✓ or ✗ marker.
pub struct WatchStatus {
    /// Rows painted by the previous message.
    painted: usize,
}

impl WatchStatus {
    pub const fn new() -> Self {
        Self { painted: 0 }
    }

    /// Green check with a one-line summary.
    pub fn success(&mut self, message: &str) {
        self.repaint(&"✓".green().to_string(), message);
    }

    /// Red cross with a summary line and an optional indented detail
    /// block (usually the error chain).
    pub fn error(&mut self, summary: &str, detail: &str) {
        let body = if detail.is_empty() {
            summary.to_owned()
        } else {
            format!("{summary}\n{detail}")
        };
        self.repaint(&"✗".red().to_string(), &body);
    }

    fn repaint(&mut self, marker: &str, body: &str) {
        let mut out = stdout().lock();

        if self.painted > 0 {
            #[allow(clippy::cast_possible_truncation)]
            execute!(
                out,
                cursor::MoveUp(self.painted as u16),
                Clear(ClearType::FromCursorDown)
            )
            .ok();
        }

        let stamp = format!("[{}]", chrono::Local::now().format("%H:%M:%S")).dimmed();
        writeln!(out, "{stamp} {marker} {body}").ok();
        out.flush().ok();

        self.painted = body.lines().count().max(1);
    }
}

// ============================================================================
// Tests
// ============================================================================
