//! Text formatting utilities for the press viewer.

use chrono::{DateTime, Utc};

/// Formats synthetic progress as a whole percentage.
///
/// # Examples
/// ```ignore
/// assert_eq!(format_progress(42.7), "43%");
/// ```
pub fn format_progress(progress: f32) -> String {
    format!("{:.0}%", progress.clamp(0.0, 100.0))
}

/// Formats a catalog timestamp as a short UTC date and time.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Shortens `text` to at most `max_chars` characters, adding an ellipsis.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}
