//! Coverage wall UI rendering
//!
//! Lays out one card per catalog item. Clicking a card opens its slide panel.

use eframe::egui;
use egui::{RichText, ScrollArea, Stroke};
use rpress::{ContentDescriptor, ContentKind, Locale, Text, ThemeColors};
use crate::app::AppState;
use crate::presentation::color_mapping;
use crate::utils::truncate_chars;

const CARD_WIDTH: f32 = 300.0;
const PREVIEW_CHARS: usize = 180;

/// Result of user interaction with the coverage wall
pub enum WallInteraction {
    /// A card was clicked
    CardClicked(String),
}

/// Renders the coverage cards inside `ui`.
pub fn render_coverage_wall(ui: &mut egui::Ui, state: &AppState, colors: &ThemeColors) -> Option<WallInteraction> {
    let mut interaction = None;

    ScrollArea::vertical()
        .id_salt("coverage_wall_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(12.0, 12.0);
                for item in state.catalog.items() {
                    let open = state.panels.lifecycle(&item.id).is_some();
                    if render_card(ui, item, open, state.locale, colors).clicked() {
                        interaction = Some(WallInteraction::CardClicked(item.id.clone()));
                    }
                }
            });
        });

    interaction
}

fn render_card(
    ui: &mut egui::Ui,
    item: &ContentDescriptor,
    open: bool,
    locale: Locale,
    colors: &ThemeColors,
) -> egui::Response {
    let stroke_color = if open { colors.accent } else { colors.border };

    let frame = egui::Frame::default()
        .fill(colors.card_background)
        .stroke(Stroke::new(1.0, stroke_color))
        .corner_radius(6.0)
        .inner_margin(12.0);

    let response = frame
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            // Labels must not swallow the card click.
            ui.style_mut().interaction.selectable_labels = false;
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(&item.outlet)
                            .strong()
                            .color(color_mapping::outlet_color(&item.outlet, colors)),
                    );
                    if let Some(tag) = item.language_tag() {
                        ui.label(RichText::new(tag).small().color(colors.text_dim));
                    }
                    if item.kind == ContentKind::SocialEmbed {
                        ui.label(RichText::new(locale.text(Text::SocialPost)).small().color(colors.text_dim));
                    }
                    if item.verified {
                        ui.label(RichText::new("✔").color(colors.success))
                            .on_hover_text(locale.text(Text::Verified));
                    }
                });

                ui.label(RichText::new(&item.headline).size(16.0).color(colors.text_strong));

                if let Some(preview) = item.preview_text() {
                    ui.label(
                        RichText::new(truncate_chars(preview, PREVIEW_CHARS))
                            .italics()
                            .color(colors.quote),
                    );
                }

                ui.horizontal(|ui| {
                    ui.label(RichText::new(item.display_date()).small().color(colors.text_dim));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("{}/10", item.impact_score))
                                .small()
                                .strong()
                                .color(color_mapping::impact_color(item.impact_score, colors)),
                        );
                    });
                });
            });
        })
        .response;

    response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
}
