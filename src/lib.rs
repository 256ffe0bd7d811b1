pub mod coverage;
pub mod panels;
pub mod theme;
pub mod locale;

// Export content model
pub use coverage::{Catalog, ContentDescriptor, ContentKind};

// Export panel stack
pub use panels::{
    EmbedScript, LoadPhase, NoEmbedScript, PanelLifecycle,
    PanelPresence, PresenceEvent, PanelRecord, PanelRegistry,
    DepartingPanel
};

// Export theme support
pub use theme::{Theme, ThemeColors, ThemeManager, ThemeMode, hex_to_color32, with_alpha};

// Export locale support
pub use locale::{Locale, Text};
