//! Header panel UI rendering
//!
//! Handles the top bar with the page title, catalog controls, theme controls
//! and the language selector.

use eframe::egui;
use egui::RichText;
use rpress::{Locale, Text, ThemeColors, ThemeMode};
use std::path::PathBuf;
use crate::app::AppState;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User picked a coverage file to load
    OpenCatalogRequested(PathBuf),
    /// User clicked "Close all"
    CloseAll,
    /// User clicked the theme toggle
    ToggleTheme,
    /// User asked to follow the system theme
    FollowSystemTheme,
    /// User picked a UI language
    SetLocale(Locale),
}

/// Renders the application header
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Application state
/// * `colors` - Palette of the active theme
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &AppState, colors: &ThemeColors) -> Option<HeaderInteraction> {
    let mut interaction = None;
    let locale = state.locale;

    ui.add_space(4.0);
    ui.label(RichText::new(locale.text(Text::Eyebrow)).small().color(colors.text_dim));

    ui.horizontal(|ui| {
        ui.label(RichText::new(locale.text(Text::Title)).heading().color(colors.text_strong));

        ui.separator();

        if ui.button(locale.text(Text::OpenCatalog)).clicked() {
            let mut dialog = rfd::FileDialog::new().add_filter("Coverage JSON", &["json"]);

            if let Ok(cwd) = std::env::current_dir() {
                dialog = dialog.set_directory(cwd);
            }

            if let Some(path) = dialog.pick_file() {
                interaction = Some(HeaderInteraction::OpenCatalogRequested(path));
            }
        }

        let any_open = !state.panels.records().is_empty();
        if ui.add_enabled(any_open, egui::Button::new(locale.text(Text::CloseAll))).clicked() {
            interaction = Some(HeaderInteraction::CloseAll);
        }

        // Push theme and language controls to the right
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let mut selected = locale;
            egui::ComboBox::from_id_salt("locale_selector")
                .selected_text(selected.native_name())
                .show_ui(ui, |ui| {
                    for candidate in Locale::ALL {
                        ui.selectable_value(&mut selected, candidate, candidate.native_name());
                    }
                });
            if selected != locale {
                interaction = Some(HeaderInteraction::SetLocale(selected));
            }
            ui.label(locale.text(Text::Language));

            ui.separator();

            let following = state.theme.preference().is_none();
            if ui
                .add_enabled(!following, egui::Button::new(locale.text(Text::FollowSystem)))
                .clicked()
            {
                interaction = Some(HeaderInteraction::FollowSystemTheme);
            }

            let icon = match state.theme.mode() {
                ThemeMode::Light => "🌙",
                ThemeMode::Dark => "☀",
            };
            if ui
                .button(icon)
                .on_hover_text(locale.text(Text::ThemeToggle))
                .clicked()
            {
                interaction = Some(HeaderInteraction::ToggleTheme);
            }
        });
    });

    if let Some(err) = &state.error_message {
        ui.colored_label(colors.error, err);
    }

    interaction
}
