//! UI panel rendering subsystem
//!
//! This module contains all UI rendering logic for the press viewer:
//! - Header panel (title, catalog controls, theme and language selectors)
//! - Coverage wall (one card per press item)
//! - Slide panel (a single stacked panel and its body)
//! - Status bar (panel count, catalog metadata, embed script readiness)
//! - Panel manager (panel orchestration and layout)

pub mod header;
pub mod coverage_wall;
pub mod slide_panel;
pub mod status_bar;
pub mod panel_manager;
