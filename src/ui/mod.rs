//! Terminal output helpers for the command-line client.
//!
//! Colored status lines, book listings and small text utilities.

use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::models::{BookStatus, BookTo};

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Search,
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Search => "🔍",
    }
}

/// Print a styled status message.
pub fn print_status(status: Status, msg: impl std::fmt::Display) {
    let icon = status_icon(status);
    match status {
        Status::Success => println!("{} {}", icon.green().bold(), msg),
        Status::Error => eprintln!("{} {}", icon.red().bold(), msg),
        Status::Warning => println!("{} {}", icon.yellow().bold(), msg),
        Status::Info => println!("{} {}", icon.cyan().bold(), msg),
        Status::Search => println!("{} {}", icon.yellow(), msg),
    }
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", format!("━━━ {} ━━━", title).bold().cyan());
}

/// Book status colored for a terminal
pub fn colored_status(status: BookStatus) -> String {
    match status {
        BookStatus::Free => status.green().to_string(),
        BookStatus::Loan => status.yellow().to_string(),
        BookStatus::Missing => status.red().to_string(),
    }
}

/// Print a single book as a labelled block.
pub fn print_book(book: &BookTo) {
    let id = book.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
    println!("{} {}", "Id:".dimmed(), id.yellow());
    println!("{} {}", "Title:".dimmed(), book.title.blue().bold());
    println!("{} {}", "Authors:".dimmed(), book.authors);
    println!("{} {}", "Status:".dimmed(), colored_status(book.status));
}

/// Truncate text to fit within `max_width` terminal columns, ending with "..." when cut.
///
/// Widths come from `unicode-width`, so wide characters count as two columns.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width <= 3 {
        return "...".to_string();
    }

    let char_widths: Vec<(char, usize)> = text
        .chars()
        .map(|c| (c, unicode_width::UnicodeWidthChar::width(c).unwrap_or(1)))
        .collect();

    let total_width: usize = char_widths.iter().map(|(_, w)| *w).sum();
    if total_width <= max_width {
        return text.to_string();
    }

    // Longest prefix that leaves room for the ellipsis
    let budget = max_width - 3;
    let mut current_width = 0;
    let mut end_idx = 0;
    for (i, (_, w)) in char_widths.iter().enumerate() {
        if current_width + w > budget {
            break;
        }
        current_width += w;
        end_idx = i + 1;
    }

    let truncated: String = char_widths[..end_idx].iter().map(|(c, _)| *c).collect();
    format!("{}...", truncated)
}
