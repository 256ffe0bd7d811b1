//! Press coverage content model.
//!
//! A [`ContentDescriptor`] is the immutable description of one media item that
//! can be opened in a slide panel. Descriptors are read from a JSON catalog
//! (see [`Catalog::from_json`]) and classified into a [`ContentKind`] once at
//! load time, so render code matches on the kind instead of probing optional
//! fields.
//!
//! # Examples
//!
//! ```
//! use rpress::coverage::{Catalog, ContentKind};
//!
//! let catalog = Catalog::builtin();
//! let wwd = catalog.get("wwd-review-ss26").unwrap();
//! assert_eq!(wwd.kind, ContentKind::EmbedBlocked);
//! ```

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_CATALOG_JSON: &str = include_str!("../data/coverage.json");

static BUILTIN_CATALOG: Lazy<Catalog> = Lazy::new(|| {
    // Parsing is covered by tests; fall back to an empty catalog.
    Catalog::from_json(BUILTIN_CATALOG_JSON).unwrap_or_else(|e| {
        tracing::error!("built-in coverage catalog is invalid: {e:#}");
        Catalog::default()
    })
});

/// How a content item can be presented inside a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Ordinary web page that may be shown in the embedded reader view.
    Ordinary,
    /// Social post that needs the external embed script to render.
    SocialEmbed,
    /// Source forbids embedding; only a static preview is shown.
    EmbedBlocked,
}

/// Immutable description of a single press item.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDescriptor {
    pub id: String,
    pub outlet: String,
    pub url: String,
    pub headline: String,
    pub excerpt: Option<String>,
    pub quote: Option<String>,
    pub quote_author: Option<String>,
    pub date: NaiveDate,
    pub language: Option<String>,
    /// 1-10, 10 being the most influential outlets.
    pub impact_score: u8,
    pub verified: bool,
    pub og_image: Option<String>,
    pub kind: ContentKind,
}

impl ContentDescriptor {
    /// Creates an ordinary descriptor with only the required fields filled in.
    pub fn new(
        id: impl Into<String>,
        outlet: impl Into<String>,
        url: impl Into<String>,
        headline: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            outlet: outlet.into(),
            url: url.into(),
            headline: headline.into(),
            excerpt: None,
            quote: None,
            quote_author: None,
            date,
            language: None,
            impact_score: 5,
            verified: false,
            og_image: None,
            kind: ContentKind::Ordinary,
        }
    }

    /// Sets the content kind (builder style).
    pub fn with_kind(mut self, kind: ContentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the excerpt (builder style).
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Sets the pull quote and optional author (builder style).
    pub fn with_quote(mut self, quote: impl Into<String>, author: Option<&str>) -> Self {
        self.quote = Some(quote.into());
        self.quote_author = author.map(str::to_owned);
        self
    }

    /// Date formatted the way cards and panels display it, e.g. "Jan 29, 2026".
    pub fn display_date(&self) -> String {
        self.date.format("%b %-d, %Y").to_string()
    }

    /// Upper-cased language tag, only for non-English items.
    pub fn language_tag(&self) -> Option<String> {
        match self.language.as_deref() {
            Some(lang) if !lang.eq_ignore_ascii_case("en") && !lang.is_empty() => {
                Some(lang.to_uppercase())
            }
            _ => None,
        }
    }

    /// Text shown in previews: the pull quote wins over the excerpt.
    pub fn preview_text(&self) -> Option<&str> {
        self.quote.as_deref().or(self.excerpt.as_deref())
    }
}

/// Raw JSON shape. Accepts both `embeddable`/`kind` and the legacy
/// `blocksIframe`/`type` fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContent {
    id: String,
    outlet: String,
    url: String,
    headline: String,
    #[serde(default)]
    excerpt: Option<String>,
    #[serde(default)]
    quote: Option<String>,
    #[serde(default)]
    quote_author: Option<String>,
    date: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default = "default_impact")]
    impact_score: u8,
    #[serde(default)]
    verified: bool,
    #[serde(default)]
    og_image: Option<String>,
    #[serde(default)]
    embeddable: Option<bool>,
    #[serde(default)]
    blocks_iframe: Option<bool>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default, rename = "type")]
    legacy_type: Option<String>,
}

fn default_impact() -> u8 {
    5
}

impl RawContent {
    fn resolve_kind(&self) -> Result<ContentKind> {
        let social = match self.kind.as_deref() {
            None | Some("ordinary") => false,
            Some("social-embed") => true,
            Some(other) => bail!("unknown content kind '{other}'"),
        } || self.legacy_type.as_deref() == Some("instagram");

        if social {
            return Ok(ContentKind::SocialEmbed);
        }
        if self.blocks_iframe == Some(true) || self.embeddable == Some(false) {
            return Ok(ContentKind::EmbedBlocked);
        }
        Ok(ContentKind::Ordinary)
    }

    fn into_descriptor(self) -> Result<ContentDescriptor> {
        let kind = self.resolve_kind()?;
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{}'", self.date))?;

        if self.url.trim().is_empty() {
            bail!("url is empty");
        }
        if !(1..=10).contains(&self.impact_score) {
            bail!("impact score {} is outside 1..=10", self.impact_score);
        }

        Ok(ContentDescriptor {
            id: self.id,
            outlet: self.outlet,
            url: self.url,
            headline: self.headline,
            excerpt: self.excerpt,
            quote: self.quote,
            quote_author: self.quote_author,
            date,
            language: self.language,
            impact_score: self.impact_score,
            verified: self.verified,
            og_image: self.og_image,
            kind,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalog {
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
    items: Vec<serde_json::Value>,
}

/// Ordered collection of press items.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<ContentDescriptor>,
    last_updated: Option<DateTime<Utc>>,
}

impl Catalog {
    /// Returns the compiled-in coverage catalog.
    pub fn builtin() -> Catalog {
        BUILTIN_CATALOG.clone()
    }

    /// Parses and validates a catalog from its JSON text.
    pub fn from_json(json: &str) -> Result<Catalog> {
        let raw: RawCatalog = serde_json::from_str(json).context("malformed catalog JSON")?;

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(raw.items.len());
        for (position, value) in raw.items.into_iter().enumerate() {
            let label = value
                .get("id")
                .and_then(|v| v.as_str())
                .map(str::to_owned)
                .unwrap_or_else(|| format!("#{position}"));

            let item: RawContent = serde_json::from_value(value)
                .with_context(|| format!("catalog item {label}"))?;
            let descriptor = item
                .into_descriptor()
                .with_context(|| format!("catalog item {label}"))?;

            if !seen.insert(descriptor.id.clone()) {
                return Err(anyhow!("duplicate catalog id '{}'", descriptor.id));
            }
            items.push(descriptor);
        }

        Ok(Catalog {
            items,
            last_updated: raw.last_updated,
        })
    }

    /// Reads a catalog file from disk.
    pub fn load(path: &Path) -> Result<Catalog> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Catalog::from_json(&text).with_context(|| format!("failed to load {}", path.display()))
    }

    pub fn items(&self) -> &[ContentDescriptor] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Looks up an item by id.
    pub fn get(&self, id: &str) -> Option<&ContentDescriptor> {
        self.items.iter().find(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(extra: &str) -> String {
        format!(
            r#"{{"lastUpdated":"2026-02-01T08:20:00Z","items":[{{"id":"a","outlet":"WWD","url":"https://wwd.com","headline":"H","date":"2026-01-29"{extra}}}]}}"#
        )
    }

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = Catalog::from_json(BUILTIN_CATALOG_JSON).unwrap();
        assert_eq!(catalog.len(), 10);
        assert!(catalog.last_updated().is_some());
        assert_eq!(
            catalog.get("ivyjstudio-instagram-ss26").unwrap().kind,
            ContentKind::SocialEmbed
        );
        assert_eq!(
            catalog.get("vogue-review-ss26").unwrap().kind,
            ContentKind::Ordinary
        );
    }

    #[test]
    fn test_kind_resolution() {
        let ordinary = Catalog::from_json(&item("")).unwrap();
        assert_eq!(ordinary.items()[0].kind, ContentKind::Ordinary);

        let blocked = Catalog::from_json(&item(r#","blocksIframe":true"#)).unwrap();
        assert_eq!(blocked.items()[0].kind, ContentKind::EmbedBlocked);

        let not_embeddable = Catalog::from_json(&item(r#","embeddable":false"#)).unwrap();
        assert_eq!(not_embeddable.items()[0].kind, ContentKind::EmbedBlocked);

        let social = Catalog::from_json(&item(r#","kind":"social-embed""#)).unwrap();
        assert_eq!(social.items()[0].kind, ContentKind::SocialEmbed);

        let legacy = Catalog::from_json(&item(r#","type":"instagram","blocksIframe":true"#)).unwrap();
        assert_eq!(legacy.items()[0].kind, ContentKind::SocialEmbed);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = Catalog::from_json(&item(r#","kind":"podcast""#)).unwrap_err();
        assert!(format!("{err:#}").contains("unknown content kind"));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let json = item("").replace("2026-01-29", "29/01/2026");
        let err = Catalog::from_json(&json).unwrap_err();
        assert!(format!("{err:#}").contains("catalog item a"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"{"items":[
            {"id":"a","outlet":"A","url":"u","headline":"h","date":"2026-01-01"},
            {"id":"a","outlet":"B","url":"u","headline":"h","date":"2026-01-02"}
        ]}"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_display_helpers() {
        let d = ContentDescriptor::new("x", "L'Officiel", "u", "h", NaiveDate::from_ymd_opt(2026, 1, 30).unwrap())
            .with_excerpt("excerpt");
        assert_eq!(d.display_date(), "Jan 30, 2026");
        assert_eq!(d.preview_text(), Some("excerpt"));
        assert_eq!(d.language_tag(), None);

        let mut d = d.with_quote("quote", Some("Author"));
        d.language = Some("fr".to_string());
        assert_eq!(d.preview_text(), Some("quote"));
        assert_eq!(d.language_tag().as_deref(), Some("FR"));
    }
}
