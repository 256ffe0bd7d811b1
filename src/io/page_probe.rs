//! Background page probes for embedded panels.
//!
//! Each mounted ordinary panel gets one probe: a background thread fetches
//! the content URL, checks whether the site allows being framed and extracts
//! a short reader summary. Results come back through a channel that is
//! polled once per frame, keeping the GUI responsive during network I/O.
//!
//! Probes are keyed by content id. Cancelling a probe drops its receiver, so
//! a late result from the worker thread is discarded.

use anyhow::{bail, Context, Result};
use eframe::egui;
use reqwest::header::{HeaderMap, CONTENT_SECURITY_POLICY, X_FRAME_OPTIONS};
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = concat!("rpress/", env!("CARGO_PKG_VERSION"));

/// Reader summary of a successfully probed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub final_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Outcome of a probe. Errors are kept as display strings.
pub type ProbeResult = std::result::Result<PageSummary, String>;

/// Tracks in-flight and finished probes.
#[derive(Default)]
pub struct PageProbes {
    pending: HashMap<String, Receiver<ProbeResult>>,
    summaries: HashMap<String, PageSummary>,
    failures: HashMap<String, String>,
}

impl PageProbes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts fetching `url` for the panel `id`.
    pub fn start(&mut self, id: &str, url: &str, ctx: &egui::Context) {
        let url = url.to_owned();
        self.start_with(id, ctx, move || fetch_summary(&url).map_err(|e| format!("{e:#}")));
    }

    /// Runs `job` on a background thread and records its result under `id`.
    pub fn start_with<F>(&mut self, id: &str, ctx: &egui::Context, job: F)
    where
        F: FnOnce() -> ProbeResult + Send + 'static,
    {
        self.cancel(id);

        let (sender, receiver) = channel();
        self.pending.insert(id.to_owned(), receiver);

        let ctx_handle = ctx.clone();
        let probe_id = id.to_owned();
        thread::spawn(move || {
            let result = job();
            // Receiver is gone if the panel closed meanwhile.
            if sender.send(result).is_err() {
                tracing::debug!(id = %probe_id, "probe finished after cancellation");
            }
            ctx_handle.request_repaint();
        });
    }

    /// Forgets everything about the probe for `id`.
    pub fn cancel(&mut self, id: &str) {
        if self.pending.remove(id).is_some() {
            tracing::debug!(id, "probe cancelled");
        }
        self.summaries.remove(id);
        self.failures.remove(id);
    }

    /// Cancels every probe, e.g. when the page content is replaced.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
        self.summaries.clear();
        self.failures.clear();
    }

    /// Collects finished probes. Call once per frame.
    pub fn poll(&mut self) -> Vec<(String, ProbeResult)> {
        let mut finished = Vec::new();

        self.pending.retain(|id, receiver| match receiver.try_recv() {
            Ok(result) => {
                finished.push((id.clone(), result));
                false
            }
            Err(TryRecvError::Empty) => true,
            Err(TryRecvError::Disconnected) => {
                finished.push((id.clone(), Err("probe worker exited".to_string())));
                false
            }
        });

        for (id, result) in &finished {
            match result {
                Ok(summary) => {
                    tracing::info!(id = %id, url = %summary.final_url, "page probe succeeded");
                    self.summaries.insert(id.clone(), summary.clone());
                }
                Err(error) => {
                    tracing::warn!(id = %id, %error, "page probe failed");
                    self.failures.insert(id.clone(), error.clone());
                }
            }
        }

        finished
    }

    pub fn summary(&self, id: &str) -> Option<&PageSummary> {
        self.summaries.get(id)
    }

    pub fn failure(&self, id: &str) -> Option<&str> {
        self.failures.get(id).map(String::as_str)
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }
}

/// Fetches `url` and builds its reader summary.
fn fetch_summary(url: &str) -> Result<PageSummary> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build HTTP client")?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("request to {url} failed"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("{url} answered {status}");
    }
    if let Some(reason) = framing_refusal(response.headers()) {
        bail!("{url} refuses embedding ({reason})");
    }

    let final_url = response.url().to_string();
    let body = response.text().context("failed to read page body")?;

    Ok(PageSummary {
        final_url,
        title: extract_title(&body),
        description: extract_meta_description(&body),
    })
}

/// Returns why a response forbids being framed by another origin, if it does.
pub fn framing_refusal(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(X_FRAME_OPTIONS).and_then(|v| v.to_str().ok()) {
        let value = value.trim().to_ascii_lowercase();
        if value == "deny" || value == "sameorigin" {
            return Some(format!("X-Frame-Options: {value}"));
        }
    }

    for csp in headers.get_all(CONTENT_SECURITY_POLICY) {
        let Ok(csp) = csp.to_str() else { continue };
        for directive in csp.split(';') {
            let mut parts = directive.split_whitespace();
            if !parts.next().is_some_and(|name| name.eq_ignore_ascii_case("frame-ancestors")) {
                continue;
            }
            let sources: Vec<&str> = parts.collect();
            if !sources.contains(&"*") {
                return Some(format!("frame-ancestors {}", sources.join(" ")));
            }
        }
    }

    None
}

/// Text of the first `<title>` element.
pub fn extract_title(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let open = lower.find("<title")?;
    let start = open + lower[open..].find('>')? + 1;
    let end = start + lower[start..].find("</title")?;
    clean_text(&html[start..end])
}

/// Content of `<meta name="description">` or `<meta property="og:description">`.
///
/// Tags that are unterminated or carry no readable `content` are skipped.
pub fn extract_meta_description(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let mut cursor = 0;
    while let Some(found) = lower[cursor..].find("<meta") {
        let tag_start = cursor + found;
        let Some(tag_len) = lower[tag_start..].find('>') else {
            break;
        };
        let tag_end = tag_start + tag_len;
        cursor = tag_end;

        let tag = &lower[tag_start..tag_end];
        let describes = ["name=", "property="].iter().any(|attr| {
            attribute_value(tag, attr)
                .is_some_and(|(start, end)| matches!(&tag[start..end], "description" | "og:description"))
        });
        if !describes {
            continue;
        }

        let Some((start, end)) = attribute_value(tag, "content=") else {
            continue;
        };
        if let Some(text) = clean_text(&html[tag_start + start..tag_start + end]) {
            return Some(text);
        }
    }
    None
}

/// Byte range of a quoted attribute value inside `tag`. `attr` includes the `=`.
fn attribute_value(tag: &str, attr: &str) -> Option<(usize, usize)> {
    let mut search = 0;
    while let Some(found) = tag[search..].find(attr) {
        let at = search + found;
        search = at + attr.len();
        // Require a word boundary so `content=` does not match `data-content=`.
        let boundary = at == 0 || tag.as_bytes()[at - 1].is_ascii_whitespace();
        let quote = tag[search..].chars().next();
        if !boundary {
            continue;
        }
        let Some(quote) = quote.filter(|q| *q == '"' || *q == '\'') else {
            continue;
        };
        let value_start = search + 1;
        let value_len = tag[value_start..].find(quote)?;
        return Some((value_start, value_start + value_len));
    }
    None
}

fn clean_text(raw: &str) -> Option<String> {
    let text = raw
        .replace("&amp;", "&")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use std::time::Instant;

    fn wait_for(probes: &mut PageProbes) -> Vec<(String, ProbeResult)> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let finished = probes.poll();
            if !finished.is_empty() || Instant::now() > deadline {
                return finished;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_extract_title_and_description() {
        let html = r#"<html><head><TITLE>
            Germanier &amp; Co
        </TITLE><meta charset="utf-8"><meta name="description" content="Spring 2026 Couture"></head></html>"#;
        assert_eq!(extract_title(html).as_deref(), Some("Germanier & Co"));
        assert_eq!(extract_meta_description(html).as_deref(), Some("Spring 2026 Couture"));
        assert_eq!(extract_title("<p>no title</p>"), None);
        assert_eq!(extract_meta_description("<meta name=\"author\" content=\"x\">"), None);
    }

    #[test]
    fn test_meta_description_skips_unreadable_tags() {
        let html = r#"<meta name='description' content='Single quoted'><meta property="og:title" content="T">"#;
        assert_eq!(extract_meta_description(html).as_deref(), Some("Single quoted"));

        let html = r#"<meta name="description" content=bare><meta property="og:description" content="From og">"#;
        assert_eq!(extract_meta_description(html).as_deref(), Some("From og"));

        let html = r#"<meta name="author" data-content="x" content="Someone"><meta property="og:description" content="Later">"#;
        assert_eq!(extract_meta_description(html).as_deref(), Some("Later"));

        assert_eq!(extract_meta_description(r#"<meta name="description" content="cut"#), None);
    }

    #[test]
    fn test_framing_refusal() {
        let mut headers = HeaderMap::new();
        assert_eq!(framing_refusal(&headers), None);

        headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN"));
        assert!(framing_refusal(&headers).is_some());

        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'self'; frame-ancestors 'self' https://partner.example"),
        );
        assert!(framing_refusal(&headers).is_some());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_SECURITY_POLICY, HeaderValue::from_static("frame-ancestors *"));
        assert_eq!(framing_refusal(&headers), None);
    }

    #[test]
    fn test_probe_result_is_recorded() {
        let ctx = egui::Context::default();
        let mut probes = PageProbes::new();
        probes.start_with("a", &ctx, || {
            Ok(PageSummary {
                final_url: "https://example.com".to_string(),
                title: Some("Example".to_string()),
                description: None,
            })
        });
        assert_eq!(probes.in_flight(), 1);

        let finished = wait_for(&mut probes);
        assert_eq!(finished.len(), 1);
        assert_eq!(probes.in_flight(), 0);
        assert_eq!(probes.summary("a").and_then(|s| s.title.as_deref()), Some("Example"));
    }

    #[test]
    fn test_failed_probe_is_recorded() {
        let ctx = egui::Context::default();
        let mut probes = PageProbes::new();
        probes.start_with("a", &ctx, || Err("refuses embedding".to_string()));
        wait_for(&mut probes);
        assert_eq!(probes.failure("a"), Some("refuses embedding"));
    }

    #[test]
    fn test_cancelled_probe_is_dropped() {
        let ctx = egui::Context::default();
        let mut probes = PageProbes::new();
        probes.start_with("a", &ctx, || {
            thread::sleep(Duration::from_millis(20));
            Err("late".to_string())
        });
        probes.cancel("a");
        assert_eq!(probes.in_flight(), 0);
        thread::sleep(Duration::from_millis(50));
        assert!(probes.poll().is_empty());
        assert_eq!(probes.failure("a"), None);
    }
}
