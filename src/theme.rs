//! Theme support for the press viewer.
//!
//! Two palettes are provided, one per [`ThemeMode`]. When the user has not
//! picked a mode, the initial one follows the time of day (light during the
//! day, dark at night).
//!
//! # Examples
//!
//! ```
//! use rpress::theme::{ThemeManager, ThemeMode};
//!
//! let manager = ThemeManager::new();
//! let dark = manager.get_theme(ThemeMode::Dark);
//! println!("Dark background: {:?}", dark.colors.background);
//! ```

use egui::Color32;
use serde::{Deserialize, Serialize};

/// Light or dark appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    /// Daylight hours are 07:00 to 18:59.
    pub fn for_hour(hour: u32) -> ThemeMode {
        if (7..19).contains(&hour) {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        }
    }

    pub fn toggled(self) -> ThemeMode {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }

    /// Parses the stored form ("light" / "dark"), ignoring case.
    pub fn parse(value: &str) -> Option<ThemeMode> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }
}

/// Colour palette for a theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Surfaces
    pub background: Color32,
    pub panel_background: Color32,
    pub card_background: Color32,
    pub scrim: Color32,

    // Text
    pub text: Color32,
    pub text_dim: Color32,
    pub text_strong: Color32,

    // Interactive
    pub accent: Color32,
    pub hover: Color32,
    pub selection: Color32,
    pub border: Color32,

    // Semantic
    pub error: Color32,
    pub success: Color32,
    pub quote: Color32,
}

/// A complete theme definition.
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,
    pub description: String,
    pub colors: ThemeColors,
}

/// Holds the built-in themes.
pub struct ThemeManager {
    light: Theme,
    dark: Theme,
}

impl ThemeManager {
    pub fn new() -> Self {
        Self {
            light: light_theme(),
            dark: dark_theme(),
        }
    }

    /// Theme for `mode`.
    pub fn get_theme(&self, mode: ThemeMode) -> &Theme {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    /// Applies a theme's colours to egui visuals.
    pub fn apply_theme(&self, theme: &Theme, visuals: &mut egui::Visuals) {
        let colors = &theme.colors;

        visuals.panel_fill = colors.background;
        visuals.window_fill = colors.panel_background;
        visuals.extreme_bg_color = colors.card_background;
        visuals.faint_bg_color = colors.hover;

        visuals.override_text_color = Some(colors.text);

        visuals.selection.bg_fill = colors.selection;
        visuals.selection.stroke.color = colors.accent;

        visuals.widgets.noninteractive.bg_fill = colors.panel_background;
        visuals.widgets.noninteractive.bg_stroke.color = colors.border;
        visuals.widgets.inactive.bg_fill = colors.hover;
        visuals.widgets.hovered.bg_fill = colors.hover;
        visuals.widgets.active.bg_fill = colors.selection;

        visuals.hyperlink_color = colors.accent;
        visuals.error_fg_color = colors.error;
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

fn light_theme() -> Theme {
    Theme {
        mode: ThemeMode::Light,
        description: "Warm paper tones for daytime reading".to_string(),
        colors: ThemeColors {
            background: hex_to_color32("#f5f3ef"),
            panel_background: hex_to_color32("#ffffff"),
            card_background: hex_to_color32("#fbfaf8"),
            scrim: with_alpha(Color32::BLACK, 40),

            text: hex_to_color32("#1d1d1f"),
            text_dim: hex_to_color32("#6e6e73"),
            text_strong: hex_to_color32("#000000"),

            accent: hex_to_color32("#b4533a"),
            hover: hex_to_color32("#ebe8e2"),
            selection: hex_to_color32("#e6d3c9"),
            border: hex_to_color32("#d2d2d7"),

            error: hex_to_color32("#c0392b"),
            success: hex_to_color32("#2e7d32"),
            quote: hex_to_color32("#5b4636"),
        },
    }
}

fn dark_theme() -> Theme {
    Theme {
        mode: ThemeMode::Dark,
        description: "Low-glare night palette".to_string(),
        colors: ThemeColors {
            background: hex_to_color32("#111113"),
            panel_background: hex_to_color32("#1c1c1e"),
            card_background: hex_to_color32("#18181a"),
            scrim: with_alpha(Color32::BLACK, 90),

            text: hex_to_color32("#f5f5f7"),
            text_dim: hex_to_color32("#98989d"),
            text_strong: hex_to_color32("#ffffff"),

            accent: hex_to_color32("#e8a087"),
            hover: hex_to_color32("#2c2c2e"),
            selection: hex_to_color32("#3a2f2b"),
            border: hex_to_color32("#3a3a3c"),

            error: hex_to_color32("#ff6b5e"),
            success: hex_to_color32("#6fcf73"),
            quote: hex_to_color32("#d9c2a7"),
        },
    }
}

/// Converts a hex colour string (like "#282a36") to Color32.
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color32::from_rgb(r, g, b)
    } else {
        Color32::from_rgb(0, 0, 0)
    }
}

/// Sets the alpha channel of a colour.
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
