//! Slide-over panel stack.
//!
//! - `stacking` - pure offset geometry for stacked panels
//! - `registry` - ordered record of which panels are open
//! - `lifecycle` - per-panel content loading state machine
//! - `presence` - reconciles the registry with mounted panels and exit transitions

pub mod stacking;
pub mod registry;
pub mod lifecycle;
pub mod presence;

pub use lifecycle::{EmbedScript, LoadPhase, NoEmbedScript, PanelLifecycle};
pub use presence::{DepartingPanel, PanelPresence, PresenceEvent};
pub use registry::{PanelRecord, PanelRegistry};
