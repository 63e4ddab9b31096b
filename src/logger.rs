//! Terminal logging with colored module prefixes and a page progress bar.
//!
//! - `log!` prints `[module] message`, truncated to the terminal width
//! - `ProgressBar` tracks rendered pages during `academy build`
//!
//! # Example
//!
//! ```ignore
//! log!("fetch"; "GET {}", url);
//!
//! let progress = ProgressBar::new("pages", articles.len());
//! progress.inc();
//! progress.finish();
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stdout},
    sync::{
        Mutex, OnceLock,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Whether a progress bar currently owns the line below the cursor
static BAR_ACTIVE: AtomicBool = AtomicBool::new(false);

// ============================================================================
// Layout Constants
// ============================================================================
//
// Progress bar format: "[pages] [████░░░░] 42/100"
//                       ^-----^ ^-------^ ^----^
//                       prefix  bar       count

/// Brackets plus trailing space around a module name: "[" "]" " "
const PREFIX_OVERHEAD: usize = 3;
/// Bar wrapper plus the space before the count: " [" "]" " "
const BAR_OVERHEAD: usize = 4;
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 40;

/// Display length of `[module] `.
#[inline]
const fn calc_prefix_len(module_len: usize) -> usize {
    module_len + PREFIX_OVERHEAD
}

/// Get terminal width, cached after first call.
/// Falls back to 120 columns if detection fails.
fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message with a colored module prefix.
///
/// Single-line messages are truncated to fit the terminal. If a progress bar
/// is active, the message is printed above it and the bar line is kept.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let width = get_terminal_width() as usize;

    let mut stdout = stdout().lock();
    let bar_active = BAR_ACTIVE.load(Ordering::SeqCst);
    if bar_active {
        execute!(stdout, cursor::MoveUp(1)).ok();
        execute!(stdout, Clear(ClearType::FromCursorDown)).ok();
    }

    let message = if message.contains('\n') {
        message
    } else {
        truncate_str(message, width.saturating_sub(calc_prefix_len(module.len())))
    };
    writeln!(stdout, "{prefix} {message}").ok();

    if bar_active {
        writeln!(stdout).ok();
    }
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type.
fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "serve" => prefix.bright_blue().bold(),
        "browse" => prefix.bright_green().bold(),
        "fetch" | "related" => prefix.bright_cyan().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate a string to fit within `max_len` bytes.
///
/// Ensures the result is valid UTF-8 by finding the nearest character boundary.
#[inline]
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Progress Bar
// ============================================================================

/// Single progress bar redrawn in place on the line below the logs.
///
/// `inc` may be called from rayon workers; redraws are serialized.
pub struct ProgressBar {
    prefix: ColoredString,
    prefix_len: usize,
    total: usize,
    current: AtomicUsize,
    lock: Mutex<()>,
}

impl ProgressBar {
    /// Reserve a terminal line and start at `0/total`.
    pub fn new(module: &'static str, total: usize) -> Self {
        let mut stdout = stdout().lock();
        writeln!(stdout).ok();
        stdout.flush().ok();
        BAR_ACTIVE.store(true, Ordering::SeqCst);

        Self {
            prefix: colorize_prefix(module),
            prefix_len: calc_prefix_len(module.len()),
            total,
            current: AtomicUsize::new(0),
            lock: Mutex::new(()),
        }
    }

    /// Advance by one and redraw.
    pub fn inc(&self) {
        let current = self.current.fetch_add(1, Ordering::Relaxed) + 1;
        self.display(current);
    }

    fn display(&self, current: usize) {
        let _guard = self.lock.lock().ok();

        let count = format!("{}/{}", current, self.total);
        let bar = render_bar(
            current,
            self.total,
            get_terminal_width() as usize,
            self.prefix_len + BAR_OVERHEAD + count.len(),
        );

        let mut stdout = stdout().lock();
        execute!(stdout, cursor::MoveUp(1)).ok();
        execute!(stdout, Clear(ClearType::CurrentLine)).ok();
        writeln!(stdout, "{} [{}] {}", self.prefix, bar, count).ok();
        stdout.flush().ok();
    }

    /// Clear the bar line.
    pub fn finish(&self) {
        if !BAR_ACTIVE.swap(false, Ordering::SeqCst) {
            return;
        }
        let _guard = self.lock.lock().ok();
        let mut stdout = stdout().lock();
        execute!(stdout, cursor::MoveUp(1)).ok();
        execute!(stdout, Clear(ClearType::CurrentLine)).ok();
        stdout.flush().ok();
    }
}

impl Drop for ProgressBar {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Filled/empty cells for `current` of `total`, sized to what is left of
/// `width` after `overhead` columns.
fn render_bar(current: usize, total: usize, width: usize, overhead: usize) -> String {
    let bar_width = width
        .saturating_sub(overhead)
        .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);
    let filled = if total > 0 {
        (current.min(total) * bar_width) / total
    } else {
        0
    };
    "█".repeat(filled) + &"░".repeat(bar_width - filled)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_prefix_len() {
        // "fetch" -> "[fetch] " = 5 + 3
        assert_eq!(calc_prefix_len(5), 8);
        assert_eq!(calc_prefix_len(0), 3);
    }

    #[test]
    fn test_truncate_str_short_string() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_str_needs_truncation() {
        assert_eq!(truncate_str("hello world", 5), "hello");
        assert_eq!(truncate_str("hello", 0), "");
    }

    #[test]
    fn test_truncate_str_unicode_boundary() {
        // "€" is 3 bytes
        assert_eq!(truncate_str("€€", 4), "€");
        assert_eq!(truncate_str("a€b", 3), "a");
    }

    #[test]
    fn test_render_bar_half() {
        // width 60, overhead 20 -> 40 cells
        let bar = render_bar(5, 10, 60, 20);
        assert_eq!(bar.chars().filter(|&c| c == '█').count(), 20);
        assert_eq!(bar.chars().count(), 40);
    }

    #[test]
    fn test_render_bar_clamps_width() {
        assert_eq!(render_bar(0, 10, 5, 20).chars().count(), MIN_BAR_WIDTH);
        assert_eq!(render_bar(0, 10, 500, 20).chars().count(), MAX_BAR_WIDTH);
    }

    #[test]
    fn test_render_bar_empty_total() {
        let bar = render_bar(3, 0, 60, 20);
        assert!(!bar.contains('█'));
    }

    #[test]
    fn test_render_bar_overshoot() {
        let bar = render_bar(12, 10, 60, 20);
        assert_eq!(bar.chars().filter(|&c| c == '█').count(), 40);
    }
}
