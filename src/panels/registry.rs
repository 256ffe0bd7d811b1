//! Registry of open slide panels.
//!
//! The registry is the single source of truth for which panels exist. It owns
//! an ordered list of [`PanelRecord`]s (oldest first) and keeps their
//! `stack_index` values a contiguous `1..=N` sequence after every mutation.

use std::sync::Arc;

use crate::coverage::ContentDescriptor;
use crate::panels::stacking;

/// One open panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRecord {
    id: String,
    content: Arc<ContentDescriptor>,
    stack_index: usize,
}

impl PanelRecord {
    /// Stable id of the underlying content item.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &Arc<ContentDescriptor> {
        &self.content
    }

    /// 1-based position among the open panels; higher renders on top.
    pub fn stack_index(&self) -> usize {
        self.stack_index
    }
}

/// Ordered collection of open panels, scoped to the page that owns it.
#[derive(Debug, Default)]
pub struct PanelRegistry {
    panels: Vec<PanelRecord>,
}

impl PanelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self { panels: Vec::new() }
    }

    /// Opens a panel for `content`. Returns false if it was already open.
    pub fn open(&mut self, content: Arc<ContentDescriptor>) -> bool {
        if self.contains(&content.id) {
            tracing::debug!(id = %content.id, "panel already open");
            return false;
        }

        let record = PanelRecord {
            id: content.id.clone(),
            content,
            stack_index: self.panels.len() + 1,
        };
        tracing::debug!(id = %record.id, stack_index = record.stack_index, "panel opened");
        self.panels.push(record);
        true
    }

    /// Closes the panel with `id` and compacts the remaining stack indices.
    /// Returns false if no such panel was open.
    pub fn close(&mut self, id: &str) -> bool {
        let before = self.panels.len();
        self.panels.retain(|p| p.id != id);
        if self.panels.len() == before {
            return false;
        }

        self.reindex();
        tracing::debug!(id, remaining = self.panels.len(), "panel closed");
        true
    }

    /// Closes every open panel.
    pub fn close_all(&mut self) {
        if !self.panels.is_empty() {
            tracing::debug!(count = self.panels.len(), "closing all panels");
        }
        self.panels.clear();
    }

    fn reindex(&mut self) {
        for (idx, panel) in self.panels.iter_mut().enumerate() {
            panel.stack_index = idx + 1;
        }
    }

    // ===== Queries =====

    /// Open panels in insertion order, oldest first.
    pub fn panels(&self) -> &[PanelRecord] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.panels.iter().any(|p| p.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&PanelRecord> {
        self.panels.iter().find(|p| p.id == id)
    }

    /// Position of `id` in the ordered list.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.panels.iter().position(|p| p.id == id)
    }

    /// The most recently opened panel.
    pub fn topmost(&self) -> Option<&PanelRecord> {
        self.panels.last()
    }

    /// Right-edge offset of the panel with `id`, if it is open.
    pub fn offset_of(&self, id: &str) -> Option<f32> {
        self.position(id)
            .map(|index| stacking::panel_offset(index, self.panels.len()))
    }

    /// How far the host page shifts its main content for the open panels.
    pub fn total_offset(&self, viewport_width: f32) -> f32 {
        stacking::content_shift(self.panels.len(), viewport_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn content(id: &str) -> Arc<ContentDescriptor> {
        Arc::new(ContentDescriptor::new(
            id,
            "Outlet",
            format!("https://example.com/{id}"),
            format!("Headline {id}"),
            NaiveDate::from_ymd_opt(2026, 1, 29).unwrap(),
        ))
    }

    fn indices(registry: &PanelRegistry) -> Vec<usize> {
        registry.panels().iter().map(|p| p.stack_index()).collect()
    }

    #[test]
    fn test_open_is_idempotent() {
        let mut registry = PanelRegistry::new();
        assert!(registry.open(content("a")));
        assert!(!registry.open(content("a")));
        assert_eq!(registry.len(), 1);
        assert_eq!(indices(&registry), vec![1]);
    }

    #[test]
    fn test_close_unknown_is_noop() {
        let mut registry = PanelRegistry::new();
        registry.open(content("a"));
        assert!(!registry.close("missing"));
        assert_eq!(indices(&registry), vec![1]);
    }

    #[test]
    fn test_close_compacts_indices() {
        let mut registry = PanelRegistry::new();
        for id in ["a", "b", "c", "d"] {
            registry.open(content(id));
        }
        registry.close("b");
        assert_eq!(indices(&registry), vec![1, 2, 3]);
        let ids: Vec<&str> = registry.panels().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
        assert_eq!(registry.get("c").map(|p| p.stack_index()), Some(2));
        assert!(registry.get("b").is_none());
    }

    #[test]
    fn test_topmost_and_offsets() {
        let mut registry = PanelRegistry::new();
        assert!(registry.topmost().is_none());
        registry.open(content("a"));
        registry.open(content("b"));
        assert_eq!(registry.topmost().map(|p| p.id()), Some("b"));
        assert_eq!(registry.offset_of("a"), Some(stacking::STACK_BUDGET));
        assert_eq!(registry.offset_of("b"), Some(0.0));
        assert_eq!(registry.offset_of("zzz"), None);
    }

    #[test]
    fn test_total_offset_tracks_membership() {
        let mut registry = PanelRegistry::new();
        assert_eq!(registry.total_offset(1000.0), 0.0);
        registry.open(content("a"));
        assert!(registry.total_offset(1000.0) > 0.0);
        registry.close_all();
        assert_eq!(registry.total_offset(1000.0), 0.0);
    }
}
