//! Report formatting utilities for terminal output

use crate::models::Money;

/// Money with the configured currency symbol
pub fn money(amount: Money, symbol: &str) -> String {
    amount.format_with_symbol(symbol)
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    let magnitude = pct.abs();
    if magnitude < 0.1 && magnitude > 0.0 {
        format!("{:.2}%", pct)
    } else if magnitude < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Signed percentage for trends ("+12%", "-3.5%")
pub fn format_trend(pct: f64) -> String {
    if pct > 0.0 {
        format!("+{}", format_percentage(pct))
    } else {
        format_percentage(pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Section title followed by a rule of the same width
pub fn section(title: &str) -> String {
    format!("{}\n{}\n", title, separator(title.chars().count()))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
