//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::application::services::RowView;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Format one projected row: indent, marker, icon, bold title, dimmed subtitle.
pub fn format_row(view: &RowView) -> String {
    let mut line = view.indent.clone();
    if view.marker.is_empty() {
        line.push(' ');
    } else {
        line.push_str(&view.marker.yellow().to_string());
    }
    line.push(' ');
    if !view.icon.is_empty() {
        line.push_str(&view.icon);
        line.push(' ');
    }
    line.push_str(&view.title.bold().to_string());
    if let Some(subtitle) = &view.subtitle {
        line.push_str(&format!("  {}", subtitle.dimmed()));
    }
    line
}

/// Print one projected row prefixed with its index
pub fn row(index: usize, view: &RowView) {
    println!("{:>3} {}", index.to_string().dimmed(), format_row(view));
}
