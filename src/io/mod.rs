//! Background network I/O: page probes and the social embed script.

pub mod page_probe;
pub mod embed_script;

// Re-export commonly used types
pub use page_probe::PageProbes;
pub use embed_script::{EmbedScriptLoader, EMBED_SCRIPT_URL};
