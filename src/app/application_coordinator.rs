//! Application-level coordination and workflow management.
//!
//! Handles catalog loading, panel membership changes and the per-frame
//! driving of panel lifecycles and page probes.

use crate::app::AppState;
use crate::io::PageProbes;
use crate::state::CatalogState;
use rpress::{Catalog, ContentKind, EmbedScript, Locale, PresenceEvent};
use std::path::PathBuf;
use std::time::Instant;

/// Coordinates application-level operations and workflows.
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Loads a catalog file and swaps it in.
    ///
    /// On failure the current catalog stays and an error banner is shown.
    pub fn open_catalog(state: &mut AppState, probes: &mut PageProbes, path: PathBuf) {
        match Catalog::load(&path) {
            Ok(catalog) => {
                tracing::info!(path = %path.display(), items = catalog.len(), "catalog loaded");
                probes.cancel_all();
                state.replace_catalog(CatalogState::new(catalog, Some(path)));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "catalog load failed: {e:#}");
                state.error_message = Some(format!("Error loading coverage file: {e:#}"));
            }
        }
    }

    /// Opens the panel for catalog item `id`. Unknown ids are ignored.
    pub fn open_panel(state: &mut AppState, id: &str) {
        match state.catalog.get(id) {
            Some(content) => {
                state.panels.open(content);
            }
            None => tracing::warn!(id, "open requested for unknown item"),
        }
    }

    pub fn close_panel(state: &mut AppState, id: &str) {
        state.panels.close(id);
    }

    pub fn close_all_panels(state: &mut AppState) {
        state.panels.close_all();
    }

    /// Closes the focused panel, or the topmost one if none has focus.
    pub fn close_focused_panel(state: &mut AppState) {
        let target = state
            .layout
            .focused_panel()
            .filter(|id| state.panels.lifecycle(id).is_some())
            .or_else(|| state.panels.topmost_id())
            .map(str::to_owned);

        if let Some(id) = target {
            state.panels.close(&id);
        }
    }

    pub fn set_locale(state: &mut AppState, locale: Locale) {
        if state.locale != locale {
            tracing::info!(locale = locale.code(), "locale changed");
            state.locale = locale;
        }
    }

    /// Mounts and unmounts panels after membership changes and starts or
    /// cancels their page probes.
    pub fn sync_panels(
        state: &mut AppState,
        probes: &mut PageProbes,
        script: &dyn EmbedScript,
        ctx: &egui::Context,
        now: Instant,
    ) {
        for event in state.panels.sync(now, script) {
            match event {
                PresenceEvent::Mounted(id) => {
                    state.layout.request_focus(&id);
                    let ordinary = state
                        .panels
                        .record(&id)
                        .filter(|r| r.content().kind == ContentKind::Ordinary)
                        .map(|r| r.content().url.clone());
                    if let Some(url) = ordinary {
                        probes.start(&id, &url, ctx);
                    }
                }
                PresenceEvent::Unmounted(id) => {
                    state.layout.forget_panel(&id);
                    probes.cancel(&id);
                }
            }
        }
    }

    /// Feeds finished probes into panel lifecycles.
    ///
    /// Returns true if any panel changed state.
    pub fn check_probe_completion(state: &mut AppState, probes: &mut PageProbes, now: Instant) -> bool {
        let mut changed = false;
        for (id, result) in probes.poll() {
            let Some(lifecycle) = state.panels.lifecycle_mut(&id) else {
                continue;
            };
            changed |= match result {
                Ok(_) => lifecycle.on_load(now),
                Err(_) => lifecycle.on_error(now),
            };
        }
        changed
    }

    /// Advances panel timers and returns when the next frame is needed.
    pub fn tick(state: &mut AppState, now: Instant) -> Option<Instant> {
        state.panels.tick(now);
        state.panels.next_deadline(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::page_probe::PageSummary;
    use crate::state::ThemeState;
    use rpress::{LoadPhase, NoEmbedScript};
    use std::time::Duration;

    fn app_state() -> AppState {
        AppState::new(ThemeState::default(), Locale::En)
    }

    fn settle(state: &mut AppState, probes: &mut PageProbes) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while probes.in_flight() > 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
            ApplicationCoordinator::check_probe_completion(state, probes, Instant::now());
        }
    }

    #[test]
    fn test_open_unknown_item_is_ignored() {
        let mut state = app_state();
        ApplicationCoordinator::open_panel(&mut state, "nope");
        assert_eq!(state.panels.len(), 0);
    }

    #[test]
    fn test_escape_targets_focused_then_topmost() {
        let mut state = app_state();
        let ctx = egui::Context::default();
        let mut probes = PageProbes::new();
        let now = Instant::now();

        ApplicationCoordinator::open_panel(&mut state, "wwd-review-ss26");
        ApplicationCoordinator::open_panel(&mut state, "harpers-bazaar-ss26");
        ApplicationCoordinator::sync_panels(&mut state, &mut probes, &NoEmbedScript, &ctx, now);

        state.layout.set_focused_panel(Some("wwd-review-ss26".to_string()));
        ApplicationCoordinator::close_focused_panel(&mut state);
        assert_eq!(state.panels.topmost_id(), Some("harpers-bazaar-ss26"));
        assert_eq!(state.panels.len(), 1);

        ApplicationCoordinator::sync_panels(&mut state, &mut probes, &NoEmbedScript, &ctx, now);
        assert_eq!(state.layout.focused_panel(), None);
        ApplicationCoordinator::close_focused_panel(&mut state);
        assert_eq!(state.panels.len(), 0);
    }

    #[test]
    fn test_newest_mounted_panel_claims_focus() {
        let mut state = app_state();
        let ctx = egui::Context::default();
        let mut probes = PageProbes::new();

        ApplicationCoordinator::open_panel(&mut state, "wwd-review-ss26");
        ApplicationCoordinator::open_panel(&mut state, "marie-claire-us-ss26");
        ApplicationCoordinator::sync_panels(&mut state, &mut probes, &NoEmbedScript, &ctx, Instant::now());

        assert!(!state.layout.take_focus_request("wwd-review-ss26"));
        assert!(state.layout.take_focus_request("marie-claire-us-ss26"));
        // The request is consumed once.
        assert!(!state.layout.take_focus_request("marie-claire-us-ss26"));

        let headline = state
            .panels
            .record("marie-claire-us-ss26")
            .map(|r| state.locale.panel_label(&r.content().headline));
        assert!(headline.is_some_and(|label| label.starts_with("Article: ")));
        assert_eq!(Locale::En.panel_label("H"), "Article: H");
    }

    #[test]
    fn test_blocked_panels_start_no_probe() {
        let mut state = app_state();
        let ctx = egui::Context::default();
        let mut probes = PageProbes::new();

        ApplicationCoordinator::open_panel(&mut state, "wwd-review-ss26");
        ApplicationCoordinator::sync_panels(&mut state, &mut probes, &NoEmbedScript, &ctx, Instant::now());
        assert_eq!(probes.in_flight(), 0);
        assert_eq!(
            state.panels.lifecycle("wwd-review-ss26").map(|l| l.phase()),
            Some(LoadPhase::Idle)
        );
    }

    #[test]
    fn test_probe_result_drives_lifecycle() {
        let mut state = app_state();
        let ctx = egui::Context::default();
        let mut probes = PageProbes::new();
        let now = Instant::now();

        ApplicationCoordinator::open_panel(&mut state, "vogue-review-ss26");
        state.panels.sync(now, &NoEmbedScript);
        probes.start_with("vogue-review-ss26", &ctx, || {
            Ok(PageSummary {
                final_url: "https://www.vogue.com".to_string(),
                title: None,
                description: None,
            })
        });
        settle(&mut state, &mut probes);

        assert_eq!(
            state.panels.lifecycle("vogue-review-ss26").map(|l| l.phase()),
            Some(LoadPhase::Loaded)
        );
    }

    #[test]
    fn test_failed_catalog_keeps_current() {
        let mut state = app_state();
        let mut probes = PageProbes::new();
        let before = state.catalog.items().len();
        ApplicationCoordinator::open_catalog(
            &mut state,
            &mut probes,
            std::env::temp_dir().join("rpress-missing-catalog.json"),
        );
        assert!(state.error_message.is_some());
        assert_eq!(state.catalog.items().len(), before);
    }
}
