//! Human-readable output for CLI commands.
//!
//! Colors are dropped automatically when NO_COLOR is set.

use crate::core::types::EntityKind;
use colored::Colorize;
use std::time::Duration;

/// Styles for search, feed and newsletter output
pub mod colors {
    use colored::{ColoredString, Colorize};

    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Entity kind column
    pub fn kind(s: &str) -> ColoredString {
        s.cyan()
    }

    /// Site paths and absolute URLs
    pub fn url(s: &str) -> ColoredString {
        s.blue()
    }

    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    /// Ranking score, lower is better
    pub fn score(s: &str) -> ColoredString {
        s.magenta()
    }

    pub fn rank(s: &str) -> ColoredString {
        s.green().bold()
    }
}

/// Ranking time as microseconds below 1ms, milliseconds otherwise
pub fn format_elapsed(elapsed: Duration) -> String {
    let micros = elapsed.as_micros();
    if micros < 1_000 {
        format!("{micros}µs")
    } else {
        format!("{:.1}ms", micros as f64 / 1_000.0)
    }
}

/// Plural group heading for a kind
pub fn group_heading(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Article => "Articles",
        EntityKind::Author => "Authors",
        EntityKind::Tag => "Tags",
        EntityKind::Category => "Categories",
        EntityKind::Subcategory => "Subcategories",
    }
}

/// Shorten to `max` chars with a trailing ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

pub fn print_success(message: &str) {
    println!("{}", message.green());
}

/// Warnings go to stderr so JSON output stays parseable
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", "Warning".yellow(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{}: {}", "Error".red().bold(), message);
}

/// Group heading in grouped search output
pub fn print_header(title: &str) {
    println!("{}", colors::label(title));
}
