//! Slide panel state for the coverage page.
//!
//! Bundles the panel registry with the mounted-panel bookkeeping. The state
//! lives exactly as long as the page that owns it: dropping it tears down
//! every panel timer. Callers change membership only through `open`,
//! `close` and `close_all`.

use rpress::panels::stacking;
use rpress::{
    ContentDescriptor, DepartingPanel, EmbedScript, PanelLifecycle, PanelPresence, PanelRecord,
    PanelRegistry, PresenceEvent,
};
use std::sync::Arc;
use std::time::Instant;

/// Open panels and their per-panel lifecycles.
#[derive(Debug, Default)]
pub struct PanelState {
    registry: PanelRegistry,
    presence: PanelPresence,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Membership =====

    pub fn open(&mut self, content: Arc<ContentDescriptor>) -> bool {
        self.registry.open(content)
    }

    pub fn close(&mut self, id: &str) -> bool {
        self.registry.close(id)
    }

    pub fn close_all(&mut self) {
        self.registry.close_all();
    }

    // ===== Queries =====

    /// Open panels, oldest first.
    pub fn records(&self) -> &[PanelRecord] {
        self.registry.panels()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn record(&self, id: &str) -> Option<&PanelRecord> {
        self.registry.get(id)
    }

    pub fn topmost_id(&self) -> Option<&str> {
        self.registry.topmost().map(|p| p.id())
    }

    /// Right-edge offset for the panel at `index` of the rendered list.
    pub fn offset_for(&self, index: usize) -> f32 {
        stacking::panel_offset(index, self.registry.len())
    }

    /// Horizontal space the page gives up for the open panels.
    pub fn total_offset(&self, viewport_width: f32) -> f32 {
        self.registry.total_offset(viewport_width)
    }

    pub fn lifecycle(&self, id: &str) -> Option<&PanelLifecycle> {
        self.presence.lifecycle(id)
    }

    pub fn lifecycle_mut(&mut self, id: &str) -> Option<&mut PanelLifecycle> {
        self.presence.lifecycle_mut(id)
    }

    pub fn departing(&self) -> &[DepartingPanel] {
        self.presence.departing()
    }

    pub fn enter_progress(&self, id: &str, now: Instant) -> f32 {
        self.presence.enter_progress(id, now)
    }

    // ===== Frame Driving =====

    /// Mounts and unmounts panels to match the registry.
    pub fn sync(&mut self, now: Instant, script: &dyn EmbedScript) -> Vec<PresenceEvent> {
        self.presence.sync(&self.registry, now, script)
    }

    /// Advances panel timers. Returns true if a repaint is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.presence.tick(now)
    }

    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        self.presence.next_deadline(now)
    }
}

impl Drop for PanelState {
    fn drop(&mut self) {
        self.presence.clear();
    }
}
