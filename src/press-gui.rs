//! Press Coverage Viewer GUI Application
//!
//! This module provides an interactive viewer for a collection's press
//! coverage using the egui framework. The viewer features:
//! - A wall of coverage cards built from a JSON catalog
//! - Stacked slide panels showing each article without leaving the page
//! - Background page probes that feed the panel reader view
//! - Light/dark themes and English/Chinese UI text with persistent preferences
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state management and coordination
//! - `presentation/` - Visual styling and color mapping
//! - `io/` - Background page probes and embed script loading
//! - `utils/` - Utility functions for formatting
//! - `ui/` - UI panel rendering and interaction
//! - `state/` - State management for catalog, panels, theme and focus

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

mod utils;
mod presentation;
mod io;
mod app;
mod ui;
mod state;

use app::{AppState, ApplicationCoordinator, Preferences, SettingsCoordinator, ThemeCoordinator};
use io::{EmbedScriptLoader, PageProbes, EMBED_SCRIPT_URL};
use rpress::{EmbedScript, Locale};
use state::ThemeState;
use ui::panel_manager::{PanelInteraction, PanelManager};

/// Options taken from the command line.
#[derive(Debug, Default, PartialEq)]
struct LaunchOptions {
    /// Coverage file to load on the first frame
    catalog: Option<PathBuf>,
    /// Value of `--locale=<tag>`
    locale: Option<String>,
}

/// Parses `[--locale=<tag>] [catalog.json]`. Unknown flags are ignored.
fn parse_args(args: impl IntoIterator<Item = String>) -> LaunchOptions {
    let mut options = LaunchOptions::default();
    for arg in args {
        if let Some(tag) = arg.strip_prefix("--locale=") {
            options.locale = Some(tag.to_string());
        } else if arg.starts_with("--") {
            tracing::warn!(%arg, "ignoring unknown flag");
        } else if options.catalog.is_none() {
            options.catalog = Some(PathBuf::from(arg));
        }
    }
    options
}

/// Main application entry point that initializes and launches the press viewer GUI.
fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let launch = parse_args(std::env::args().skip(1));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_title("Press Coverage"),
        ..Default::default()
    };

    eframe::run_native(
        "Press Coverage",
        options,
        Box::new(move |cc| Ok(Box::new(PressViewerApp::new(cc, launch)))),
    )
}

/// The main press viewer application.
///
/// Delegates most functionality to coordinators:
/// - `ApplicationCoordinator` handles catalog loading and panel workflows
/// - `ThemeCoordinator` handles theme selection and application
/// - `SettingsCoordinator` persists preferences
/// - `PanelManager` handles UI layout and rendering
struct PressViewerApp {
    /// Centralized application state
    state: AppState,
    /// Background page probes for open panels
    probes: PageProbes,
    /// Social embed script
    embed_script: EmbedScriptLoader,
    /// Optional catalog to load on first frame
    pending_catalog: Option<PathBuf>,
    /// Language explicitly picked in the UI
    locale_choice: Option<Locale>,
    /// Preferences as last written to storage
    saved: Preferences,
}

impl PressViewerApp {
    /// Creates a viewer with preferences loaded from persistent storage.
    fn new(cc: &eframe::CreationContext, launch: LaunchOptions) -> Self {
        let preferences = SettingsCoordinator::load_preferences(cc.storage);

        let fallback = ThemeCoordinator::initial_mode(preferences.theme, ThemeCoordinator::local_hour());
        let theme = ThemeState::new(preferences.theme, fallback);

        let env_lang = std::env::var("LANG").ok();
        let locale = Locale::detect(
            launch.locale.as_deref(),
            preferences.locale.map(Locale::code),
            env_lang.as_deref(),
        );
        tracing::info!(locale = locale.code(), theme = theme.mode().name(), "starting press viewer");

        Self {
            state: AppState::new(theme, locale),
            probes: PageProbes::new(),
            embed_script: EmbedScriptLoader::spawn(EMBED_SCRIPT_URL, &cc.egui_ctx),
            pending_catalog: launch.catalog,
            locale_choice: preferences.locale,
            saved: preferences,
        }
    }

    fn preferences(&self) -> Preferences {
        Preferences {
            theme: self.state.theme.preference(),
            locale: self.locale_choice,
        }
    }

    /// Handles panel interactions by delegating to the coordinators.
    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        match interaction {
            PanelInteraction::OpenCatalogRequested(path) => {
                ApplicationCoordinator::open_catalog(&mut self.state, &mut self.probes, path);
            }
            PanelInteraction::OpenPanel(id) => {
                ApplicationCoordinator::open_panel(&mut self.state, &id);
            }
            PanelInteraction::ClosePanel(id) => {
                ApplicationCoordinator::close_panel(&mut self.state, &id);
            }
            PanelInteraction::CloseFocused => {
                ApplicationCoordinator::close_focused_panel(&mut self.state);
            }
            PanelInteraction::CloseAll => {
                ApplicationCoordinator::close_all_panels(&mut self.state);
            }
            PanelInteraction::ToggleTheme => {
                ThemeCoordinator::toggle_theme(&mut self.state);
            }
            PanelInteraction::FollowSystemTheme => {
                ThemeCoordinator::follow_system(ctx, &mut self.state);
            }
            PanelInteraction::SetLocale(locale) => {
                self.locale_choice = Some(locale);
                ApplicationCoordinator::set_locale(&mut self.state, locale);
            }
        }
        ctx.request_repaint();
    }
}

impl eframe::App for PressViewerApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let preferences = self.preferences();
        SettingsCoordinator::save_preferences(storage, &preferences);
        self.saved = preferences;
    }

    /// Main update loop:
    /// 1. Load the command-line catalog on the first frame
    /// 2. Feed finished probes into panel lifecycles
    /// 3. Mount/unmount panels and advance their timers
    /// 4. Apply theme and render all panels
    /// 5. Handle interactions and persist changed preferences
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let now = Instant::now();

        if let Some(path) = self.pending_catalog.take() {
            ApplicationCoordinator::open_catalog(&mut self.state, &mut self.probes, path);
        }

        ApplicationCoordinator::check_probe_completion(&mut self.state, &mut self.probes, now);
        ApplicationCoordinator::sync_panels(&mut self.state, &mut self.probes, &self.embed_script, ctx, now);
        let next_deadline = ApplicationCoordinator::tick(&mut self.state, now);

        ThemeCoordinator::apply_current_theme(ctx, &self.state);

        if let Some(interaction) = PanelManager::render_all_panels(
            ctx,
            &mut self.state,
            &self.probes,
            self.embed_script.is_ready(),
            now,
        ) {
            self.handle_panel_interaction(interaction, ctx);
        }

        // Persist preferences as soon as they change
        let preferences = self.preferences();
        if preferences != self.saved {
            if let Some(storage) = frame.storage_mut() {
                SettingsCoordinator::save_preferences(storage, &preferences);
                self.saved = preferences;
            }
        }

        if let Some(deadline) = next_deadline {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}
