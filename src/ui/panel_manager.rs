//! Panel orchestration and layout management.
//!
//! Coordinates the header, status bar, coverage wall and the stack of slide
//! panels, and folds their interactions into a single result per frame.

use crate::app::AppState;
use crate::io::PageProbes;
use crate::presentation::color_mapping;
use crate::ui::slide_panel::{self, PanelView, SlidePanelInteraction};
use crate::ui::{coverage_wall, header, status_bar};
use rpress::Locale;
use std::path::PathBuf;
use std::time::Instant;

const SHIFT_ANIMATION_SECS: f32 = 0.25;
const MIN_WALL_WIDTH: f32 = 240.0;

/// Result of panel interactions that need to be handled by the application coordinator.
pub enum PanelInteraction {
    /// User requested to load a coverage file
    OpenCatalogRequested(PathBuf),
    /// A coverage card was clicked
    OpenPanel(String),
    /// A panel's close button was clicked
    ClosePanel(String),
    /// Escape was pressed while panels were open
    CloseFocused,
    /// "Close all" was clicked
    CloseAll,
    /// Theme toggle clicked
    ToggleTheme,
    /// "Follow system" clicked
    FollowSystemTheme,
    /// A UI language was picked
    SetLocale(Locale),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// This is the main entry point for rendering the entire UI, called from
    /// the eframe::App::update() implementation.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        probes: &PageProbes,
        script_ready: bool,
        now: Instant,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;

        // Escape is read before drawing: egui drops widget focus on Escape,
        // so the focus recorded last frame is the one that counts.
        if !state.panels.records().is_empty() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            interaction = Some(PanelInteraction::CloseFocused);
        }

        // Get theme colors for rendering
        let theme_colors =
            color_mapping::theme_colors(state.theme.theme_manager(), state.theme.mode()).clone();

        // Header panel at the top
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state, &theme_colors) {
                interaction = Some(match header_interaction {
                    header::HeaderInteraction::OpenCatalogRequested(path) => {
                        PanelInteraction::OpenCatalogRequested(path)
                    }
                    header::HeaderInteraction::CloseAll => PanelInteraction::CloseAll,
                    header::HeaderInteraction::ToggleTheme => PanelInteraction::ToggleTheme,
                    header::HeaderInteraction::FollowSystemTheme => PanelInteraction::FollowSystemTheme,
                    header::HeaderInteraction::SetLocale(locale) => PanelInteraction::SetLocale(locale),
                });
            }
        });

        // Status panel at the very bottom
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state, &theme_colors, script_ready);
        });

        // Central page: the wall narrows while panels push it aside
        let page_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(12))
            .fill(theme_colors.background);

        let page_rect = egui::CentralPanel::default()
            .frame(page_frame)
            .show(ctx, |ui| {
                let full_width = ui.max_rect().width();
                let shift = ctx.animate_value_with_time(
                    egui::Id::new("content_shift"),
                    state.panels.total_offset(ctx.content_rect().width()),
                    SHIFT_ANIMATION_SECS,
                );
                ui.set_max_width((full_width - shift).max(MIN_WALL_WIDTH));

                if let Some(coverage_wall::WallInteraction::CardClicked(id)) =
                    coverage_wall::render_coverage_wall(ui, state, &theme_colors)
                {
                    interaction = Some(PanelInteraction::OpenPanel(id));
                }
            })
            .response
            .rect;

        let view = PanelView {
            bounds: egui::Rect::from_min_max(
                egui::pos2(ctx.content_rect().left(), page_rect.top()),
                egui::pos2(ctx.content_rect().right(), page_rect.bottom()),
            ),
            colors: &theme_colors,
            locale: state.locale,
            probes,
            now,
        };

        // Departing panels first so live panels stay above them
        for departing in state.panels.departing() {
            slide_panel::render_departing_panel(ctx, departing, &view);
        }

        let mut focused_panel = None;
        for (index, record) in state.panels.records().iter().enumerate() {
            let outcome = slide_panel::render_slide_panel(
                ctx,
                record,
                index,
                &state.panels,
                &mut state.layout,
                &view,
            );
            if outcome.focused {
                focused_panel = Some(record.id().to_owned());
            }
            if let Some(SlidePanelInteraction::Close(id)) = outcome.interaction {
                interaction = Some(PanelInteraction::ClosePanel(id));
            }
        }
        state.layout.set_focused_panel(focused_panel);

        interaction
    }
}
