//! User preference persistence.
//!
//! Theme and language choices are stored in eframe's persistent storage as
//! JSON strings, one key per preference. An absent choice is stored as
//! `null` so clearing a preference survives restarts. Bare legacy values
//! such as `light` (not valid JSON) are still understood.

use rpress::{Locale, ThemeMode};
use serde::{Deserialize, Serialize};

pub const THEME_KEY: &str = "theme_preference";
pub const LOCALE_KEY: &str = "locale_preference";

/// Explicit user choices. `None` means "not chosen".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Option<ThemeMode>,
    pub locale: Option<Locale>,
}

/// Coordinates preference persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads all preferences; missing or unreadable entries are `None`.
    pub fn load_preferences(storage: Option<&dyn eframe::Storage>) -> Preferences {
        let Some(storage) = storage else {
            return Preferences::default();
        };

        Preferences {
            theme: Self::load_choice(storage, THEME_KEY, ThemeMode::parse),
            locale: Self::load_choice(storage, LOCALE_KEY, Locale::parse),
        }
    }

    /// Writes all preferences and flushes the storage.
    pub fn save_preferences(storage: &mut dyn eframe::Storage, preferences: &Preferences) {
        Self::save_choice(storage, THEME_KEY, &preferences.theme);
        Self::save_choice(storage, LOCALE_KEY, &preferences.locale);
        storage.flush();
    }

    fn load_choice<T>(
        storage: &dyn eframe::Storage,
        key: &str,
        legacy: fn(&str) -> Option<T>,
    ) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let raw = storage.get_string(key)?;
        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(value) => value,
            Err(_) => {
                let value = legacy(&raw);
                if value.is_none() {
                    tracing::warn!(key, %raw, "ignoring unreadable preference");
                }
                value
            }
        }
    }

    fn save_choice<T: Serialize>(storage: &mut dyn eframe::Storage, key: &str, value: &Option<T>) {
        match serde_json::to_string(value) {
            Ok(json) => storage.set_string(key, json),
            Err(e) => tracing::warn!(key, "failed to serialize preference: {e}"),
        }
    }
}
