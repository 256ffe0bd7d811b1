//! Per-panel content loading lifecycle.
//!
//! Every mounted panel owns one [`PanelLifecycle`]. It is a small state
//! machine driven by three inputs: the clock (`tick`), the real load signals
//! (`on_load` / `on_error`) and content changes (`content_changed`). Time is
//! always passed in, so the machine never reads a clock itself.
//!
//! | from      | input                          | to        | effect                                   |
//! |-----------|--------------------------------|-----------|------------------------------------------|
//! | (mount)   | kind = EmbedBlocked            | `Idle`    | preview only, no timers                  |
//! | (mount)   | kind = Ordinary                | `Loading` | progress ramp starts                     |
//! | (mount)   | kind = SocialEmbed, script up  | `Loading` | `process()`, ramp, short ready deadline  |
//! | (mount)   | kind = SocialEmbed, no script  | `Loading` | ramp, long fallback deadline             |
//! | `Loading` | `on_load`                      | `Loaded`  | ramp cancelled, progress 100, settle     |
//! | `Loading` | `on_error`                     | `Failed`  | ramp cancelled, progress 100, settle     |
//! | `Loading` | embed deadline elapsed         | `Loaded`  | same as `on_load`                        |
//! | any       | settle deadline elapsed        | same      | progress back to 0                       |
//! | any       | content id changed             | (mount)   | every pending timer cancelled first      |
//!
//! Load signals outside `Loading` are stale and ignored.

use std::time::{Duration, Instant};

use crate::coverage::{ContentDescriptor, ContentKind};

/// The simulated ramp never reaches this value on its own.
pub const PROGRESS_CEILING: f32 = 90.0;
/// Time constant of the exponential progress ramp.
pub const RAMP_TIME_CONSTANT: Duration = Duration::from_millis(1200);
/// Interval at which a loading panel wants to be redrawn.
pub const RAMP_TICK: Duration = Duration::from_millis(100);
/// How long a finished load keeps showing 100% before resetting.
pub const SETTLE_DELAY: Duration = Duration::from_millis(400);
/// Delay after `EmbedScript::process` before a social embed counts as loaded.
pub const SOCIAL_READY_DELAY: Duration = Duration::from_secs(1);
/// Upper bound on waiting for a social embed when the script is missing.
pub const SOCIAL_FALLBACK_TIMEOUT: Duration = Duration::from_secs(3);

/// External script that turns social post markup into rendered embeds.
pub trait EmbedScript {
    /// True once the script is available.
    fn is_ready(&self) -> bool;
    /// Asks the script to process embeds that are currently on screen.
    fn process(&self);
}

/// Stand-in for environments where no embed script is ever available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEmbedScript;

impl EmbedScript for NoEmbedScript {
    fn is_ready(&self) -> bool {
        false
    }

    fn process(&self) {}
}

/// Coarse loading state of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing to load (embed-blocked preview).
    Idle,
    Loading,
    Loaded,
    /// Load failed; the panel offers to open the content externally.
    Failed,
}

/// Ramp value after `elapsed`: fast at first, flattening out below
/// [`PROGRESS_CEILING`].
pub fn ramp_progress(elapsed: Duration) -> f32 {
    let t = elapsed.as_secs_f32() / RAMP_TIME_CONSTANT.as_secs_f32();
    let value = PROGRESS_CEILING * (1.0 - (-t).exp());
    // exp() underflows to 0 for large t; keep the ceiling exclusive.
    value.min(PROGRESS_CEILING - f32::EPSILON * PROGRESS_CEILING)
}

/// Loading state machine of one panel.
#[derive(Debug, Clone)]
pub struct PanelLifecycle {
    content_id: String,
    kind: ContentKind,
    phase: LoadPhase,
    progress: f32,
    ramp_started: Option<Instant>,
    embed_deadline: Option<Instant>,
    settle_at: Option<Instant>,
}

impl PanelLifecycle {
    /// Creates the lifecycle for a freshly mounted panel.
    pub fn mount(content: &ContentDescriptor, now: Instant, script: &dyn EmbedScript) -> Self {
        let mut lifecycle = Self {
            content_id: content.id.clone(),
            kind: content.kind,
            phase: LoadPhase::Idle,
            progress: 0.0,
            ramp_started: None,
            embed_deadline: None,
            settle_at: None,
        };
        lifecycle.start(now, script);
        lifecycle
    }

    fn start(&mut self, now: Instant, script: &dyn EmbedScript) {
        self.progress = 0.0;
        match self.kind {
            ContentKind::EmbedBlocked => {
                self.phase = LoadPhase::Idle;
            }
            ContentKind::Ordinary => {
                self.phase = LoadPhase::Loading;
                self.ramp_started = Some(now);
            }
            ContentKind::SocialEmbed => {
                self.phase = LoadPhase::Loading;
                self.ramp_started = Some(now);
                let wait = if script.is_ready() {
                    script.process();
                    SOCIAL_READY_DELAY
                } else {
                    tracing::debug!(id = %self.content_id, "embed script not ready, using fallback timeout");
                    SOCIAL_FALLBACK_TIMEOUT
                };
                self.embed_deadline = Some(now + wait);
            }
        }
        tracing::debug!(id = %self.content_id, phase = ?self.phase, "panel lifecycle started");
    }

    /// Restarts the lifecycle if the panel now shows different content.
    /// Returns true if a restart happened.
    pub fn content_changed(
        &mut self,
        content: &ContentDescriptor,
        now: Instant,
        script: &dyn EmbedScript,
    ) -> bool {
        if content.id == self.content_id {
            return false;
        }
        self.teardown();
        self.content_id = content.id.clone();
        self.kind = content.kind;
        self.start(now, script);
        true
    }

    /// Cancels every pending timer. Called on unmount and before a restart.
    pub fn teardown(&mut self) {
        self.ramp_started = None;
        self.embed_deadline = None;
        self.settle_at = None;
    }

    /// Advances timers to `now`. Returns true if anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let Some(deadline) = self.embed_deadline {
            if now >= deadline {
                tracing::debug!(id = %self.content_id, "social embed deadline reached");
                self.finish(LoadPhase::Loaded, now);
                changed = true;
            }
        }

        if let (LoadPhase::Loading, Some(started)) = (self.phase, self.ramp_started) {
            let next = ramp_progress(now.saturating_duration_since(started));
            if next > self.progress {
                self.progress = next;
                changed = true;
            }
        }

        if let Some(settle_at) = self.settle_at {
            if now >= settle_at {
                self.settle_at = None;
                self.progress = 0.0;
                changed = true;
            }
        }

        changed
    }

    /// Real load-complete signal. Always wins over the simulated ramp.
    pub fn on_load(&mut self, now: Instant) -> bool {
        if self.phase != LoadPhase::Loading {
            return false;
        }
        self.finish(LoadPhase::Loaded, now);
        true
    }

    /// Real load-failure signal.
    pub fn on_error(&mut self, now: Instant) -> bool {
        if self.phase != LoadPhase::Loading {
            return false;
        }
        self.finish(LoadPhase::Failed, now);
        true
    }

    fn finish(&mut self, phase: LoadPhase, now: Instant) {
        self.ramp_started = None;
        self.embed_deadline = None;
        self.progress = 100.0;
        self.phase = phase;
        self.settle_at = Some(now + SETTLE_DELAY);
        tracing::debug!(id = %self.content_id, ?phase, "panel load finished");
    }

    // ===== Queries =====

    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Synthetic progress in `[0, 100]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// True while the loading indicator should be visible.
    pub fn show_loader(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// True when the error affordance replaces the embedded view.
    pub fn show_error(&self) -> bool {
        self.phase == LoadPhase::Failed
    }

    /// Number of timers currently armed.
    pub fn pending_timers(&self) -> usize {
        [
            self.ramp_started.is_some(),
            self.embed_deadline.is_some(),
            self.settle_at.is_some(),
        ]
        .iter()
        .filter(|armed| **armed)
        .count()
    }

    /// Earliest instant at which `tick` would change something.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let ramp = self.ramp_started.map(|_| now + RAMP_TICK);
        [ramp, self.embed_deadline, self.settle_at]
            .into_iter()
            .flatten()
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::cell::Cell;

    struct ReadyScript {
        processed: Cell<usize>,
    }

    impl EmbedScript for ReadyScript {
        fn is_ready(&self) -> bool {
            true
        }

        fn process(&self) {
            self.processed.set(self.processed.get() + 1);
        }
    }

    fn descriptor(id: &str, kind: ContentKind) -> ContentDescriptor {
        ContentDescriptor::new(id, "Outlet", "https://example.com", "Headline", NaiveDate::from_ymd_opt(2026, 1, 29).unwrap())
            .with_kind(kind)
    }

    #[test]
    fn test_ramp_decelerates_below_ceiling() {
        let mut last = 0.0;
        let mut last_step = f32::MAX;
        for ms in (100..=3000).step_by(100) {
            let value = ramp_progress(Duration::from_millis(ms));
            assert!(value > last);
            assert!(value - last < last_step);
            assert!(value < PROGRESS_CEILING);
            last_step = value - last;
            last = value;
        }
        assert!(ramp_progress(Duration::from_secs(3600)) < PROGRESS_CEILING);
    }

    #[test]
    fn test_ordinary_load_wins_over_ramp() {
        let t0 = Instant::now();
        let mut lc = PanelLifecycle::mount(&descriptor("a", ContentKind::Ordinary), t0, &NoEmbedScript);
        assert_eq!(lc.phase(), LoadPhase::Loading);
        assert!(lc.show_loader());

        lc.tick(t0 + Duration::from_millis(500));
        let mid = lc.progress();
        assert!(mid > 0.0 && mid < PROGRESS_CEILING);

        assert!(lc.on_load(t0 + Duration::from_millis(600)));
        assert_eq!(lc.phase(), LoadPhase::Loaded);
        assert_eq!(lc.progress(), 100.0);
        assert!(!lc.show_loader());

        // Ramp is gone: later ticks never pull progress back under 100 until settle.
        lc.tick(t0 + Duration::from_millis(700));
        assert_eq!(lc.progress(), 100.0);

        lc.tick(t0 + Duration::from_millis(600) + SETTLE_DELAY);
        assert_eq!(lc.progress(), 0.0);
        assert_eq!(lc.pending_timers(), 0);
    }

    #[test]
    fn test_error_shows_affordance() {
        let t0 = Instant::now();
        let mut lc = PanelLifecycle::mount(&descriptor("a", ContentKind::Ordinary), t0, &NoEmbedScript);
        assert!(lc.on_error(t0));
        assert!(lc.show_error());
        assert_eq!(lc.progress(), 100.0);
        // A late success signal is stale.
        assert!(!lc.on_load(t0 + Duration::from_millis(10)));
        assert_eq!(lc.phase(), LoadPhase::Failed);
    }

    #[test]
    fn test_blocked_never_loads() {
        let t0 = Instant::now();
        let mut lc = PanelLifecycle::mount(&descriptor("a", ContentKind::EmbedBlocked), t0, &NoEmbedScript);
        assert_eq!(lc.phase(), LoadPhase::Idle);
        assert!(!lc.show_loader());
        assert_eq!(lc.pending_timers(), 0);
        assert!(!lc.on_load(t0));
        assert!(!lc.tick(t0 + Duration::from_secs(10)));
        assert_eq!(lc.next_deadline(t0), None);
    }

    #[test]
    fn test_social_with_script_uses_short_delay() {
        let t0 = Instant::now();
        let script = ReadyScript { processed: Cell::new(0) };
        let mut lc = PanelLifecycle::mount(&descriptor("ig", ContentKind::SocialEmbed), t0, &script);
        assert_eq!(script.processed.get(), 1);

        lc.tick(t0 + SOCIAL_READY_DELAY - Duration::from_millis(1));
        assert_eq!(lc.phase(), LoadPhase::Loading);
        lc.tick(t0 + SOCIAL_READY_DELAY);
        assert_eq!(lc.phase(), LoadPhase::Loaded);
    }

    #[test]
    fn test_social_without_script_falls_back() {
        let t0 = Instant::now();
        let mut lc = PanelLifecycle::mount(&descriptor("ig", ContentKind::SocialEmbed), t0, &NoEmbedScript);
        lc.tick(t0 + SOCIAL_READY_DELAY);
        assert_eq!(lc.phase(), LoadPhase::Loading);
        assert_eq!(lc.next_deadline(t0 + SOCIAL_READY_DELAY), Some(t0 + SOCIAL_READY_DELAY + RAMP_TICK));
        lc.tick(t0 + SOCIAL_FALLBACK_TIMEOUT);
        assert_eq!(lc.phase(), LoadPhase::Loaded);
    }

    #[test]
    fn test_content_change_cancels_timers() {
        let t0 = Instant::now();
        let mut lc = PanelLifecycle::mount(&descriptor("ig", ContentKind::SocialEmbed), t0, &NoEmbedScript);
        assert_eq!(lc.pending_timers(), 2);

        assert!(!lc.content_changed(&descriptor("ig", ContentKind::SocialEmbed), t0, &NoEmbedScript));

        let t1 = t0 + Duration::from_secs(2);
        assert!(lc.content_changed(&descriptor("blocked", ContentKind::EmbedBlocked), t1, &NoEmbedScript));
        assert_eq!(lc.content_id(), "blocked");
        assert_eq!(lc.pending_timers(), 0);
        // The old fallback deadline must not fire for the new content.
        assert!(!lc.tick(t0 + SOCIAL_FALLBACK_TIMEOUT));
        assert_eq!(lc.phase(), LoadPhase::Idle);
    }

    #[test]
    fn test_teardown_clears_everything() {
        let t0 = Instant::now();
        let mut lc = PanelLifecycle::mount(&descriptor("a", ContentKind::Ordinary), t0, &NoEmbedScript);
        lc.teardown();
        assert_eq!(lc.pending_timers(), 0);
        assert_eq!(lc.next_deadline(t0), None);
    }
}
