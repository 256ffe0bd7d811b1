//! State management modules for the press viewer.
//!
//! This module contains state-only logic (no UI concerns):
//! - Catalog state (loaded coverage items)
//! - Panel state (page-scoped panel registry and lifecycles)
//! - Theme state (theme manager, explicit choice, effective mode)
//! - Layout state (panel focus bookkeeping)

mod catalog_state;
mod panel_state;
mod theme_state;
mod layout_state;

pub use catalog_state::CatalogState;
pub use panel_state::PanelState;
pub use theme_state::ThemeState;
pub use layout_state::LayoutState;
