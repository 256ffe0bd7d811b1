//! Theme and styling state management.
//!
//! Tracks the user's explicit theme choice (if any) separately from the mode
//! actually in effect, so "follow system" can clear the choice without
//! losing track of what is on screen.

use rpress::{ThemeManager, ThemeMode};

/// State related to visual theme and styling.
pub struct ThemeState {
    theme_manager: ThemeManager,
    /// Explicit user choice; `None` follows the system.
    preference: Option<ThemeMode>,
    effective: ThemeMode,
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("preference", &self.preference)
            .field("effective", &self.effective)
            .finish_non_exhaustive()
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new(None, ThemeMode::Dark)
    }
}

impl ThemeState {
    /// Creates theme state from a stored preference and the fallback mode
    /// used when there is none.
    pub fn new(preference: Option<ThemeMode>, fallback: ThemeMode) -> Self {
        Self {
            theme_manager: ThemeManager::new(),
            preference,
            effective: preference.unwrap_or(fallback),
        }
    }

    // ===== Theme Queries =====

    pub fn theme_manager(&self) -> &ThemeManager {
        &self.theme_manager
    }

    /// Mode currently applied to the UI.
    pub fn mode(&self) -> ThemeMode {
        self.effective
    }

    /// Explicit user choice, if any.
    pub fn preference(&self) -> Option<ThemeMode> {
        self.preference
    }

    // ===== Theme Mutations =====

    /// Pins the theme to `mode`.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.preference = Some(mode);
        self.effective = mode;
    }

    /// Flips between light and dark and pins the result.
    pub fn toggle(&mut self) {
        self.set_mode(self.effective.toggled());
    }

    /// Drops the explicit choice and applies `system`.
    pub fn follow_system(&mut self, system: ThemeMode) {
        self.preference = None;
        self.effective = system;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_wins_over_fallback() {
        let state = ThemeState::new(Some(ThemeMode::Light), ThemeMode::Dark);
        assert_eq!(state.mode(), ThemeMode::Light);
        let state = ThemeState::new(None, ThemeMode::Dark);
        assert_eq!(state.mode(), ThemeMode::Dark);
        assert_eq!(state.preference(), None);
    }

    #[test]
    fn test_toggle_then_follow_system() {
        let mut state = ThemeState::new(None, ThemeMode::Dark);
        state.toggle();
        assert_eq!(state.preference(), Some(ThemeMode::Light));
        state.follow_system(ThemeMode::Dark);
        assert_eq!(state.preference(), None);
        assert_eq!(state.mode(), ThemeMode::Dark);
    }
}
