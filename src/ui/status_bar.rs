//! Status bar UI rendering
//!
//! Handles the bottom status bar: open panels, catalog size and freshness,
//! embed script readiness.

use eframe::egui;
use egui::RichText;
use rpress::{Text, ThemeColors};
use crate::app::AppState;
use crate::utils::format_timestamp;

/// Renders the status panel at the bottom of the window
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
/// * `script_ready` - Whether the social embed script has loaded
pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState, colors: &ThemeColors, script_ready: bool) {
    let locale = state.locale;

    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("{} {}", state.panels.len(), locale.text(Text::PanelsOpen))).strong());
        ui.label(RichText::new("|").strong());

        let catalog = state.catalog.catalog();
        let mut summary = format!("{} {}", catalog.len(), locale.text(Text::Items));
        if let Some(updated) = catalog.last_updated() {
            summary.push_str(&format!(", {} {}", locale.text(Text::Updated), format_timestamp(updated)));
        }
        ui.label(RichText::new(summary).strong());

        if let Some(source) = state.catalog.source() {
            ui.label(RichText::new("|").strong());
            ui.label(RichText::new(source.display().to_string()).color(colors.text_dim));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if script_ready {
                ui.colored_label(colors.success, locale.text(Text::EmbedScriptReady));
            } else {
                ui.colored_label(colors.text_dim, locale.text(Text::EmbedScriptPending));
            }
        });
    });
}
