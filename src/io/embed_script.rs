//! Social embed script availability.
//!
//! Social-embed panels need an external script before their posts render.
//! The script is fetched once in the background at startup; panels that open
//! before it arrives fall back to a fixed timeout instead of waiting forever.

use eframe::egui;
use rpress::EmbedScript;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Script that renders social post embeds.
pub const EMBED_SCRIPT_URL: &str = "https://www.instagram.com/embed.js";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Background-loaded embed script.
pub struct EmbedScriptLoader {
    ready: Arc<AtomicBool>,
    process_requests: AtomicUsize,
}

impl EmbedScriptLoader {
    /// A loader whose script never becomes available.
    pub fn unavailable() -> Self {
        Self {
            ready: Arc::new(AtomicBool::new(false)),
            process_requests: AtomicUsize::new(0),
        }
    }

    /// Starts fetching the script from `url` in a background thread.
    pub fn spawn(url: &str, ctx: &egui::Context) -> Self {
        let loader = Self::unavailable();
        let ready = Arc::clone(&loader.ready);
        let ctx_handle = ctx.clone();
        let url = url.to_owned();

        thread::spawn(move || {
            match fetch_script(&url) {
                Ok(bytes) => {
                    tracing::info!(%url, bytes, "embed script loaded");
                    ready.store(true, Ordering::Release);
                    ctx_handle.request_repaint();
                }
                Err(e) => tracing::warn!(%url, "embed script unavailable: {e:#}"),
            }
        });

        loader
    }

    /// Marks the script as available.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// How many times panels asked the script to process embeds.
    pub fn process_requests(&self) -> usize {
        self.process_requests.load(Ordering::Relaxed)
    }
}

impl EmbedScript for EmbedScriptLoader {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn process(&self) {
        let count = self.process_requests.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(count, "embed processing requested");
    }
}

fn fetch_script(url: &str) -> anyhow::Result<usize> {
    use anyhow::Context;

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("failed to build HTTP client")?;
    let response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("request to {url} failed"))?;
    let body = response.bytes().context("failed to read script body")?;
    Ok(body.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_until_marked() {
        let loader = EmbedScriptLoader::unavailable();
        assert!(!loader.is_ready());
        loader.mark_ready();
        assert!(loader.is_ready());
    }

    #[test]
    fn test_process_is_counted() {
        let loader = EmbedScriptLoader::unavailable();
        loader.process();
        loader.process();
        assert_eq!(loader.process_requests(), 2);
    }
}
