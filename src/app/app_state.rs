//! Centralized application state for the press viewer.
//!
//! Composes focused state components that each manage one aspect of the
//! application, keeping invariants local and borrows disjoint.

use rpress::Locale;
use crate::state::{CatalogState, LayoutState, PanelState, ThemeState};

/// Main application state composed of focused state components.
#[derive(Debug, Default)]
pub struct AppState {
    /// Coverage items shown on the wall
    pub catalog: CatalogState,

    /// Open slide panels (page-scoped)
    pub panels: PanelState,

    /// Theme and styling state
    pub theme: ThemeState,

    /// Panel focus bookkeeping
    pub layout: LayoutState,

    /// UI language
    pub locale: Locale,

    /// Current error message to display (if any)
    pub error_message: Option<String>,
}

impl AppState {
    /// Creates application state with the built-in catalog.
    pub fn new(theme: ThemeState, locale: Locale) -> Self {
        Self {
            catalog: CatalogState::default(),
            panels: PanelState::new(),
            theme,
            layout: LayoutState::new(),
            locale,
            error_message: None,
        }
    }

    /// Swaps in a new catalog. Panels of the old page are discarded.
    pub fn replace_catalog(&mut self, catalog: CatalogState) {
        self.panels = PanelState::new();
        self.layout = LayoutState::new();
        self.catalog = catalog;
        self.error_message = None;
    }
}
