//! Colour mapping for coverage cards and panels.
//!
//! Assignment is deterministic: impact badges by score band, outlet accents
//! by a stable hash of the outlet name.

use egui::Color32;
use rpress::{ThemeColors, ThemeManager, ThemeMode};

/// Returns the palette for `mode`.
pub fn theme_colors(theme_manager: &ThemeManager, mode: ThemeMode) -> &ThemeColors {
    &theme_manager.get_theme(mode).colors
}

/// Badge colour for an impact score (1-10).
pub fn impact_color(score: u8, colors: &ThemeColors) -> Color32 {
    match score {
        9..=10 => colors.accent,
        7..=8 => colors.quote,
        _ => colors.text_dim,
    }
}

/// Stable accent for an outlet's tab strip.
pub fn outlet_color(outlet: &str, colors: &ThemeColors) -> Color32 {
    let palette = [colors.accent, colors.quote, colors.success, colors.text_dim];
    let hash = outlet
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
    palette[(hash as usize) % palette.len()]
}
