//! Slide panel UI rendering
//!
//! Draws one open panel as a foreground area anchored to the right edge of
//! the page. The panel slides in on mount, claims keyboard focus on its first
//! frame and renders its body according to the content kind.

use eframe::egui;
use egui::emath::easing;
use egui::{pos2, Rect, RichText, Sense, Stroke};
use rpress::panels::stacking;
use rpress::{
    ContentDescriptor, ContentKind, DepartingPanel, Locale, PanelLifecycle, PanelRecord, Text,
    ThemeColors,
};
use std::time::Instant;
use crate::io::PageProbes;
use crate::state::{LayoutState, PanelState};
use crate::utils::format_progress;

const FRAME_MARGIN: f32 = 14.0;
const OFFSET_ANIMATION_SECS: f32 = 0.2;

/// Result of user interaction with a slide panel
pub enum SlidePanelInteraction {
    /// Close button clicked
    Close(String),
}

/// What a rendered panel reports back to the panel manager.
pub struct SlidePanelOutcome {
    pub interaction: Option<SlidePanelInteraction>,
    /// The panel held keyboard focus at the end of the frame
    pub focused: bool,
}

/// Shared per-frame inputs for rendering panels.
pub struct PanelView<'a> {
    /// Page area the panels are anchored to
    pub bounds: Rect,
    pub colors: &'a ThemeColors,
    pub locale: Locale,
    pub probes: &'a PageProbes,
    pub now: Instant,
}

/// Screen rectangle of a panel.
///
/// `slide` is 0 when the panel is fully in place and 1 when it sits one full
/// panel width to the right of its resting position.
pub fn panel_rect(bounds: Rect, offset: f32, slide: f32) -> Rect {
    let width = stacking::panel_width(bounds.width());
    let right = bounds.right() - offset + slide.clamp(0.0, 1.0) * width;
    Rect::from_min_max(pos2(right - width, bounds.top()), pos2(right, bounds.bottom()))
}

/// Renders the panel for `record`, which sits at `index` in the open list.
pub fn render_slide_panel(
    ctx: &egui::Context,
    record: &PanelRecord,
    index: usize,
    panels: &PanelState,
    layout: &mut LayoutState,
    view: &PanelView,
) -> SlidePanelOutcome {
    let id = record.id();
    let content = record.content();
    let area_id = egui::Id::new(("slide_panel", id));

    let offset = ctx.animate_value_with_time(
        area_id.with("offset"),
        panels.offset_for(index),
        OFFSET_ANIMATION_SECS,
    );
    let slide = 1.0 - easing::cubic_out(panels.enter_progress(id, view.now));
    let rect = panel_rect(view.bounds, offset, slide);

    let mut interaction = None;
    let mut focused = false;

    egui::Area::new(area_id)
        .order(egui::Order::Foreground)
        .fixed_pos(rect.min)
        .constrain(false)
        .show(ctx, |ui| {
            // Background target that carries focus and the dialog label.
            let background = ui.interact(rect, area_id.with("focus"), Sense::click());
            let label = view.locale.panel_label(&content.headline);
            background.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Window, true, &label));

            if layout.take_focus_request(id) || background.clicked() {
                background.request_focus();
            }

            let close = panel_frame(view.colors)
                .show(ui, |ui| {
                    fit_to(ui, rect);
                    let close = render_panel_header(ui, content, view);
                    ui.separator();
                    render_body(ui, content, panels.lifecycle(id), view);
                    close
                })
                .inner;

            if close.clicked() {
                interaction = Some(SlidePanelInteraction::Close(id.to_owned()));
            }
            focused = background.has_focus() || close.has_focus();
        });

    ctx.move_to_top(egui::LayerId::new(egui::Order::Foreground, area_id));

    SlidePanelOutcome { interaction, focused }
}

/// Renders a closed panel on its way out. It takes no input.
pub fn render_departing_panel(ctx: &egui::Context, departing: &DepartingPanel, view: &PanelView) {
    let area_id = egui::Id::new(("departing_panel", departing.content.id.as_str()));
    let slide = easing::cubic_in(departing.exit_progress(view.now));
    let rect = panel_rect(view.bounds, departing.offset, slide);

    egui::Area::new(area_id)
        .order(egui::Order::Foreground)
        .fixed_pos(rect.min)
        .constrain(false)
        .interactable(false)
        .show(ctx, |ui| {
            panel_frame(view.colors).show(ui, |ui| {
                fit_to(ui, rect);
                ui.label(RichText::new(&departing.content.outlet).strong().color(view.colors.accent));
                ui.separator();
                ui.label(RichText::new(&departing.content.headline).heading().color(view.colors.text_strong));
            });
        });
}

fn panel_frame(colors: &ThemeColors) -> egui::Frame {
    egui::Frame::default()
        .fill(colors.panel_background)
        .stroke(Stroke::new(1.0, colors.border))
        .inner_margin(FRAME_MARGIN)
}

fn fit_to(ui: &mut egui::Ui, rect: Rect) {
    let inner = rect.size() - egui::vec2(2.0 * FRAME_MARGIN + 2.0, 2.0 * FRAME_MARGIN + 2.0);
    ui.set_min_size(inner);
    ui.set_max_size(inner);
}

/// Outlet, language tag and the open/close buttons. Returns the close button.
fn render_panel_header(ui: &mut egui::Ui, content: &ContentDescriptor, view: &PanelView) -> egui::Response {
    ui.horizontal(|ui| {
        ui.label(RichText::new(&content.outlet).strong().color(view.colors.accent));
        if let Some(tag) = content.language_tag() {
            ui.label(RichText::new(tag).small().color(view.colors.text_dim));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let close = ui
                .button("✖")
                .on_hover_text(view.locale.text(Text::ClosePanel));

            if ui
                .button("↗")
                .on_hover_text(view.locale.open_outlet(&content.outlet))
                .clicked()
            {
                ui.ctx().open_url(egui::OpenUrl::new_tab(&content.url));
            }
            close
        })
        .inner
    })
    .inner
}

fn render_body(
    ui: &mut egui::Ui,
    content: &ContentDescriptor,
    lifecycle: Option<&PanelLifecycle>,
    view: &PanelView,
) {
    egui::ScrollArea::vertical()
        .id_salt(("panel_body", content.id.as_str()))
        .auto_shrink([false, false])
        .show(ui, |ui| match content.kind {
            ContentKind::EmbedBlocked => render_preview(ui, content, view),
            ContentKind::Ordinary => render_reader(ui, content, lifecycle, view),
            ContentKind::SocialEmbed => render_social(ui, content, lifecycle, view),
        });
}

fn render_loader(ui: &mut egui::Ui, content: &ContentDescriptor, lifecycle: &PanelLifecycle, view: &PanelView) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(RichText::new(view.locale.loading(&content.outlet)).color(view.colors.text_dim));
    });
    let progress = lifecycle.progress();
    ui.add(
        egui::ProgressBar::new(progress / 100.0)
            .desired_height(4.0)
            .text(format_progress(progress)),
    );
}

/// Body passage of the static preview.
#[derive(Debug, PartialEq)]
enum PreviewPassage<'a> {
    Quote { text: &'a str, author: Option<&'a str> },
    Excerpt(&'a str),
}

/// The pull quote wins; the excerpt is shown only when there is no quote.
fn preview_passage(content: &ContentDescriptor) -> Option<PreviewPassage<'_>> {
    match (&content.quote, &content.excerpt) {
        (Some(quote), _) => Some(PreviewPassage::Quote {
            text: quote,
            author: content.quote_author.as_deref(),
        }),
        (None, Some(excerpt)) => Some(PreviewPassage::Excerpt(excerpt)),
        (None, None) => None,
    }
}

/// Static preview for sites that refuse to be framed.
fn render_preview(ui: &mut egui::Ui, content: &ContentDescriptor, view: &PanelView) {
    let colors = view.colors;

    ui.label(RichText::new(view.locale.text(Text::CannotEmbed)).color(colors.text_dim));
    ui.add_space(8.0);
    ui.label(RichText::new(&content.headline).heading().color(colors.text_strong));
    ui.label(RichText::new(content.display_date()).small().color(colors.text_dim));
    ui.add_space(8.0);

    match preview_passage(content) {
        Some(PreviewPassage::Quote { text, author }) => {
            ui.label(RichText::new(format!("“{text}”")).italics().color(colors.quote));
            if let Some(author) = author {
                ui.label(RichText::new(format!("— {author}")).small().color(colors.text_dim));
            }
            ui.add_space(6.0);
        }
        Some(PreviewPassage::Excerpt(text)) => {
            ui.label(text);
            ui.add_space(6.0);
        }
        None => {}
    }

    ui.hyperlink_to(
        format!("{} {} ↗", view.locale.text(Text::ReadOn), content.outlet),
        &content.url,
    );
}

/// Reader view fed by the page probe.
fn render_reader(
    ui: &mut egui::Ui,
    content: &ContentDescriptor,
    lifecycle: Option<&PanelLifecycle>,
    view: &PanelView,
) {
    let colors = view.colors;

    if let Some(lifecycle) = lifecycle {
        if lifecycle.show_loader() {
            render_loader(ui, content, lifecycle, view);
            ui.add_space(8.0);
        }
        if lifecycle.show_error() {
            let reason = view
                .probes
                .failure(&content.id)
                .unwrap_or(view.locale.text(Text::CannotEmbed));
            ui.colored_label(colors.error, reason);
            ui.add_space(8.0);
            ui.hyperlink_to(view.locale.open_outlet(&content.outlet), &content.url);
            return;
        }
    }

    match view.probes.summary(&content.id) {
        Some(summary) => {
            let title = summary.title.as_deref().unwrap_or(&content.headline);
            ui.label(RichText::new(title).heading().color(colors.text_strong));
            ui.label(RichText::new(content.display_date()).small().color(colors.text_dim));
            ui.add_space(8.0);
            if let Some(description) = &summary.description {
                ui.label(description);
                ui.add_space(8.0);
            }
            if let Some(quote) = &content.quote {
                ui.label(RichText::new(format!("“{quote}”")).italics().color(colors.quote));
                ui.add_space(8.0);
            }
            ui.hyperlink_to(view.locale.text(Text::OpenInNewTab), &summary.final_url);
        }
        None => {
            ui.label(RichText::new(&content.headline).heading().color(colors.text_dim));
        }
    }
}

/// Social post card. The post itself is shown once the embed has settled.
fn render_social(
    ui: &mut egui::Ui,
    content: &ContentDescriptor,
    lifecycle: Option<&PanelLifecycle>,
    view: &PanelView,
) {
    let colors = view.colors;

    if let Some(lifecycle) = lifecycle.filter(|l| l.show_loader()) {
        render_loader(ui, content, lifecycle, view);
        return;
    }

    egui::Frame::default()
        .fill(colors.card_background)
        .stroke(Stroke::new(1.0, colors.border))
        .corner_radius(8.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.label(RichText::new(view.locale.text(Text::SocialPost)).small().color(colors.text_dim));
            ui.label(RichText::new(&content.headline).strong().color(colors.text_strong));
            if let Some(preview) = content.preview_text() {
                ui.label(preview);
            }
            ui.label(RichText::new(content.display_date()).small().color(colors.text_dim));
            ui.add_space(6.0);
            ui.hyperlink_to(view.locale.text(Text::ViewPost), &content.url);
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::from_min_max(pos2(0.0, 40.0), pos2(1000.0, 740.0))
    }

    #[test]
    fn test_resting_panel_is_flush_right() {
        let rect = panel_rect(bounds(), 0.0, 0.0);
        assert_eq!(rect.right(), 1000.0);
        assert_eq!(rect.width(), 400.0);
        assert_eq!(rect.top(), 40.0);
    }

    #[test]
    fn test_preview_shows_quote_or_excerpt() {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 1, 29).unwrap();
        let bare = ContentDescriptor::new("a", "WWD", "https://wwd.com", "Headline", date)
            .with_kind(ContentKind::EmbedBlocked);
        assert_eq!(preview_passage(&bare), None);

        let excerpt_only = bare.clone().with_excerpt("Sequins everywhere");
        assert_eq!(preview_passage(&excerpt_only), Some(PreviewPassage::Excerpt("Sequins everywhere")));

        let both = excerpt_only.with_quote("Joyful", Some("Editor"));
        assert_eq!(
            preview_passage(&both),
            Some(PreviewPassage::Quote { text: "Joyful", author: Some("Editor") })
        );
    }

    #[test]
    fn test_offset_and_slide() {
        let rect = panel_rect(bounds(), 120.0, 0.0);
        assert_eq!(rect.right(), 880.0);

        let hidden = panel_rect(bounds(), 0.0, 1.0);
        assert_eq!(hidden.left(), 1000.0);

        let clamped = panel_rect(bounds(), 0.0, 3.0);
        assert_eq!(clamped, hidden);
    }
}
