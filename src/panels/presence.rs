//! Reconciles the registry with the set of rendered panels.
//!
//! [`PanelPresence`] mounts a [`PanelLifecycle`] for every record that appears
//! in the registry and tears it down when the record disappears. Removed
//! panels linger in a departing list only long enough to animate out; that
//! list never delays new panels, so opens and closes are visible on the very
//! next frame.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::coverage::ContentDescriptor;
use crate::panels::lifecycle::{EmbedScript, PanelLifecycle};
use crate::panels::registry::PanelRegistry;
use crate::panels::stacking;

/// Duration of the slide-in transition.
pub const ENTER_DURATION: Duration = Duration::from_millis(250);
/// Duration of the slide-out transition.
pub const EXIT_DURATION: Duration = Duration::from_millis(200);

/// Membership change reported by [`PanelPresence::sync`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenceEvent {
    Mounted(String),
    Unmounted(String),
}

/// A panel currently mounted for a registry record.
#[derive(Debug)]
pub struct MountedPanel {
    pub lifecycle: PanelLifecycle,
    content: Arc<ContentDescriptor>,
    mounted_at: Instant,
    last_offset: f32,
    last_stack_index: usize,
}

/// A closed panel still animating out.
#[derive(Debug, Clone)]
pub struct DepartingPanel {
    pub content: Arc<ContentDescriptor>,
    /// Offset the panel had when it was closed.
    pub offset: f32,
    pub stack_index: usize,
    started: Instant,
}

impl DepartingPanel {
    /// Exit transition progress in `[0, 1]`.
    pub fn exit_progress(&self, now: Instant) -> f32 {
        transition_fraction(now.saturating_duration_since(self.started), EXIT_DURATION)
    }
}

fn transition_fraction(elapsed: Duration, total: Duration) -> f32 {
    (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}

/// Mounted and departing panels for one page.
#[derive(Debug, Default)]
pub struct PanelPresence {
    mounted: HashMap<String, MountedPanel>,
    departing: Vec<DepartingPanel>,
}

impl PanelPresence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the mounted set in line with `registry`.
    pub fn sync(
        &mut self,
        registry: &PanelRegistry,
        now: Instant,
        script: &dyn EmbedScript,
    ) -> Vec<PresenceEvent> {
        let mut events = Vec::new();

        let gone: Vec<String> = self
            .mounted
            .keys()
            .filter(|id| !registry.contains(id))
            .cloned()
            .collect();
        for id in gone {
            if let Some(mut panel) = self.mounted.remove(&id) {
                panel.lifecycle.teardown();
                self.departing.push(DepartingPanel {
                    content: panel.content,
                    offset: panel.last_offset,
                    stack_index: panel.last_stack_index,
                    started: now,
                });
                events.push(PresenceEvent::Unmounted(id));
            }
        }

        let total = registry.len();
        for (index, record) in registry.panels().iter().enumerate() {
            let offset = stacking::panel_offset(index, total);
            match self.mounted.get_mut(record.id()) {
                Some(panel) => {
                    panel.last_offset = offset;
                    panel.last_stack_index = record.stack_index();
                }
                None => {
                    // Re-opened while still animating out: the new panel replaces it.
                    self.departing.retain(|d| d.content.id != record.id());
                    let lifecycle = PanelLifecycle::mount(record.content(), now, script);
                    self.mounted.insert(
                        record.id().to_owned(),
                        MountedPanel {
                            lifecycle,
                            content: Arc::clone(record.content()),
                            mounted_at: now,
                            last_offset: offset,
                            last_stack_index: record.stack_index(),
                        },
                    );
                    events.push(PresenceEvent::Mounted(record.id().to_owned()));
                }
            }
        }

        self.departing
            .retain(|d| now.saturating_duration_since(d.started) < EXIT_DURATION);

        events
    }

    /// Advances all lifecycles. Returns true if any panel changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for panel in self.mounted.values_mut() {
            changed |= panel.lifecycle.tick(now);
        }
        changed
    }

    pub fn lifecycle(&self, id: &str) -> Option<&PanelLifecycle> {
        self.mounted.get(id).map(|p| &p.lifecycle)
    }

    pub fn lifecycle_mut(&mut self, id: &str) -> Option<&mut PanelLifecycle> {
        self.mounted.get_mut(id).map(|p| &mut p.lifecycle)
    }

    pub fn is_mounted(&self, id: &str) -> bool {
        self.mounted.contains_key(id)
    }

    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }

    pub fn departing(&self) -> &[DepartingPanel] {
        &self.departing
    }

    /// Slide-in progress in `[0, 1]` for a mounted panel.
    pub fn enter_progress(&self, id: &str, now: Instant) -> f32 {
        self.mounted
            .get(id)
            .map(|p| transition_fraction(now.saturating_duration_since(p.mounted_at), ENTER_DURATION))
            .unwrap_or(1.0)
    }

    /// Earliest instant at which something needs redrawing.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let lifecycles = self.mounted.values().filter_map(|p| p.lifecycle.next_deadline(now));
        let entering = self
            .mounted
            .values()
            .map(|p| p.mounted_at + ENTER_DURATION)
            .filter(|end| *end > now)
            .map(|_| now + Duration::from_millis(16));
        let exiting = self
            .departing
            .iter()
            .map(|_| now + Duration::from_millis(16));
        lifecycles.chain(entering).chain(exiting).min()
    }

    /// Total armed timers across all mounted panels.
    pub fn pending_timers(&self) -> usize {
        self.mounted.values().map(|p| p.lifecycle.pending_timers()).sum()
    }

    /// Unmounts everything immediately (page teardown).
    pub fn clear(&mut self) {
        for panel in self.mounted.values_mut() {
            panel.lifecycle.teardown();
        }
        self.mounted.clear();
        self.departing.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::ContentKind;
    use crate::panels::lifecycle::{LoadPhase, NoEmbedScript};
    use chrono::NaiveDate;

    fn content(id: &str, kind: ContentKind) -> Arc<ContentDescriptor> {
        Arc::new(
            ContentDescriptor::new(id, "Outlet", "https://example.com", "Headline", NaiveDate::from_ymd_opt(2026, 1, 29).unwrap())
                .with_kind(kind),
        )
    }

    #[test]
    fn test_sync_mounts_and_unmounts() {
        let t0 = Instant::now();
        let mut registry = PanelRegistry::new();
        let mut presence = PanelPresence::new();

        registry.open(content("a", ContentKind::Ordinary));
        registry.open(content("b", ContentKind::EmbedBlocked));
        let events = presence.sync(&registry, t0, &NoEmbedScript);
        assert_eq!(
            events,
            vec![PresenceEvent::Mounted("a".into()), PresenceEvent::Mounted("b".into())]
        );
        assert_eq!(presence.lifecycle("a").map(|l| l.phase()), Some(LoadPhase::Loading));
        assert_eq!(presence.lifecycle("b").map(|l| l.phase()), Some(LoadPhase::Idle));

        // A second sync with no change is quiet.
        assert!(presence.sync(&registry, t0, &NoEmbedScript).is_empty());

        registry.close("a");
        let events = presence.sync(&registry, t0, &NoEmbedScript);
        assert_eq!(events, vec![PresenceEvent::Unmounted("a".into())]);
        assert!(!presence.is_mounted("a"));
        assert_eq!(presence.departing().len(), 1);
        assert_eq!(presence.departing()[0].offset, stacking::STACK_BUDGET);
        assert_eq!(presence.pending_timers(), 0);
    }

    #[test]
    fn test_departing_does_not_block_reopen() {
        let t0 = Instant::now();
        let mut registry = PanelRegistry::new();
        let mut presence = PanelPresence::new();

        registry.open(content("a", ContentKind::Ordinary));
        presence.sync(&registry, t0, &NoEmbedScript);
        registry.close("a");
        presence.sync(&registry, t0, &NoEmbedScript);
        registry.open(content("a", ContentKind::Ordinary));
        let events = presence.sync(&registry, t0 + Duration::from_millis(10), &NoEmbedScript);

        assert_eq!(events, vec![PresenceEvent::Mounted("a".into())]);
        assert!(presence.departing().is_empty());
        assert_eq!(presence.enter_progress("a", t0 + Duration::from_millis(10)), 0.0);
    }

    #[test]
    fn test_departing_expires() {
        let t0 = Instant::now();
        let mut registry = PanelRegistry::new();
        let mut presence = PanelPresence::new();

        registry.open(content("a", ContentKind::Ordinary));
        presence.sync(&registry, t0, &NoEmbedScript);
        registry.close_all();
        presence.sync(&registry, t0, &NoEmbedScript);
        assert_eq!(presence.departing()[0].exit_progress(t0 + EXIT_DURATION / 2), 0.5);

        presence.sync(&registry, t0 + EXIT_DURATION, &NoEmbedScript);
        assert!(presence.departing().is_empty());
    }

    #[test]
    fn test_social_fallback_through_tick() {
        let t0 = Instant::now();
        let mut registry = PanelRegistry::new();
        let mut presence = PanelPresence::new();

        registry.open(content("ig", ContentKind::SocialEmbed));
        presence.sync(&registry, t0, &NoEmbedScript);
        presence.tick(t0 + crate::panels::lifecycle::SOCIAL_FALLBACK_TIMEOUT);
        assert_eq!(presence.lifecycle("ig").map(|l| l.phase()), Some(LoadPhase::Loaded));
    }

    #[test]
    fn test_clear_tears_down() {
        let t0 = Instant::now();
        let mut registry = PanelRegistry::new();
        let mut presence = PanelPresence::new();
        registry.open(content("a", ContentKind::Ordinary));
        presence.sync(&registry, t0, &NoEmbedScript);
        presence.clear();
        assert_eq!(presence.mounted_count(), 0);
        assert_eq!(presence.pending_timers(), 0);
        assert_eq!(presence.next_deadline(t0), None);
    }
}
