//! Utility modules for the press viewer.

pub mod formatting;

// Re-export commonly used functions
pub use formatting::{format_progress, format_timestamp, truncate_chars};
