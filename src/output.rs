//! Status lines for the patgen driver.
//!
//! Every processed configuration file gets one line on stderr, with the verb
//! right-aligned in a fixed column. stdout carries only `list` and
//! `completions` output.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Width of the right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Severity of a status line, which picks its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Status,
    Warning,
    Error,
}

impl Level {
    fn ansi(self) -> &'static str {
        match self {
            Level::Status => "\x1b[32m",
            Level::Warning => "\x1b[33m",
            Level::Error => "\x1b[31m",
        }
    }
}

/// Writes per-file status lines, coloured when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// A file that was generated or checked, e.g. `   Generated rect.bmp (256x256)`.
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(Level::Status, verb, message);
    }

    /// A file that produced no image.
    pub fn warning(&self, verb: &str, message: &str) {
        self.emit(Level::Warning, verb, message);
    }

    /// A file that failed, or a run that stopped.
    pub fn error(&self, verb: &str, message: &str) {
        self.emit(Level::Error, verb, message);
    }

    /// The closing tally of a run; red when any file failed.
    pub fn finished(&self, verb: &str, message: &str, failed: usize) {
        let level = if failed == 0 { Level::Status } else { Level::Error };
        self.emit(level, verb, message);
    }

    fn emit(&self, level: Level, verb: &str, message: &str) {
        let line = self.format_line(level, verb, message);
        // Status output is best-effort.
        let _ = writeln!(io::stderr().lock(), "{}", line);
    }

    fn format_line(&self, level: Level, verb: &str, message: &str) -> String {
        if self.color {
            format!("{BOLD}{}{verb:>VERB_WIDTH$}{RESET} {message}", level.ansi())
        } else {
            format!("{verb:>VERB_WIDTH$} {message}")
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// `plural(1, "image", "images")` is "1 image", any other count takes the plural.
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    let noun = if n == 1 { singular } else { pluralized };
    format!("{} {}", n, noun)
}

/// Show an input or output path relative to the working directory.
///
/// Configurations passed as absolute paths under the current directory are
/// shortened; anything else is shown as given.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));

    match relative {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}
