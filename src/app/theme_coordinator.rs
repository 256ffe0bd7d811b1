//! Theme resolution and application.
//!
//! Picks the initial theme at startup and pushes the active palette into the
//! egui context every frame.

use chrono::Timelike;
use rpress::ThemeMode;
use crate::app::AppState;

/// Coordinates theme selection and application.
pub struct ThemeCoordinator;

impl ThemeCoordinator {
    /// Mode to start with: the stored choice, else light during the day.
    pub fn initial_mode(stored: Option<ThemeMode>, local_hour: u32) -> ThemeMode {
        stored.unwrap_or_else(|| ThemeMode::for_hour(local_hour))
    }

    /// Current local hour, used for the time-of-day default.
    pub fn local_hour() -> u32 {
        chrono::Local::now().hour()
    }

    /// Theme reported by the operating system, dark when unknown.
    pub fn system_mode(ctx: &egui::Context) -> ThemeMode {
        match ctx.system_theme() {
            Some(egui::Theme::Light) => ThemeMode::Light,
            _ => ThemeMode::Dark,
        }
    }

    /// Flips light and dark and pins the result as the user's choice.
    pub fn toggle_theme(state: &mut AppState) {
        state.theme.toggle();
        tracing::info!(mode = state.theme.mode().name(), "theme toggled");
    }

    /// Clears the user's choice and adopts the system theme.
    pub fn follow_system(ctx: &egui::Context, state: &mut AppState) {
        let system = Self::system_mode(ctx);
        state.theme.follow_system(system);
        tracing::info!(mode = system.name(), "following system theme");
    }

    /// Applies the current theme to the egui context.
    ///
    /// Called every frame so a toggle takes effect immediately.
    pub fn apply_current_theme(ctx: &egui::Context, state: &AppState) {
        let mode = state.theme.mode();
        let theme = state.theme.theme_manager().get_theme(mode);
        let mut visuals = match mode {
            ThemeMode::Light => egui::Visuals::light(),
            ThemeMode::Dark => egui::Visuals::dark(),
        };

        state.theme.theme_manager().apply_theme(theme, &mut visuals);
        ctx.set_visuals(visuals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_mode() {
        assert_eq!(ThemeCoordinator::initial_mode(Some(ThemeMode::Dark), 12), ThemeMode::Dark);
        assert_eq!(ThemeCoordinator::initial_mode(None, 12), ThemeMode::Light);
        assert_eq!(ThemeCoordinator::initial_mode(None, 23), ThemeMode::Dark);
    }

    #[test]
    fn test_toggle_pins_choice() {
        let mut state = AppState::default();
        let before = state.theme.mode();
        ThemeCoordinator::toggle_theme(&mut state);
        assert_eq!(state.theme.mode(), before.toggled());
        assert_eq!(state.theme.preference(), Some(before.toggled()));
    }

    #[test]
    fn test_follow_system_clears_choice() {
        let ctx = egui::Context::default();
        let mut state = AppState::default();
        ThemeCoordinator::toggle_theme(&mut state);
        ThemeCoordinator::follow_system(&ctx, &mut state);
        assert_eq!(state.theme.preference(), None);
        assert_eq!(state.theme.mode(), ThemeCoordinator::system_mode(&ctx));
    }
}
