//! Tag values and per-key resolution policies.
//!
//! Each tag key (`title`, `description`, `image`, ...) has a resolver that
//! overlays the page's value onto the site default. Keys without a dedicated
//! resolver fall back to "page value if non-empty, else default".

use crate::config::SiteSettings;
use crate::sitemap::SitemapNode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// A tag value: plain text or text keyed by language code.
///
/// Any other JSON shape (numbers, flags, nested objects) is kept as `Other`
/// so configuration with extra route data still loads; it never resolves to
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Text(String),
    Localized(BTreeMap<String, String>),
    Other(serde_json::Value),
}

impl TagValue {
    /// Text for the given language. Plain text ignores the language.
    pub fn text(&self, language: &str) -> Option<&str> {
        match self {
            TagValue::Text(text) => Some(text),
            TagValue::Localized(map) => map.get(language).map(String::as_str),
            TagValue::Other(_) => None,
        }
    }

    /// Like [`TagValue::text`] but treats the empty string as missing.
    pub fn non_empty(&self, language: &str) -> Option<&str> {
        self.text(language).filter(|text| !text.is_empty())
    }
}

impl From<&str> for TagValue {
    fn from(text: &str) -> Self {
        TagValue::Text(text.to_string())
    }
}

impl From<String> for TagValue {
    fn from(text: String) -> Self {
        TagValue::Text(text)
    }
}

impl From<BTreeMap<String, String>> for TagValue {
    fn from(map: BTreeMap<String, String>) -> Self {
        TagValue::Localized(map)
    }
}

/// Site-wide default value for every tag key, in rewrite order.
pub type DefaultTagTable = IndexMap<String, TagValue>;

/// Per-request inputs to tag resolution.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Request path as received, before any prefix strip.
    pub request_path: &'a str,
    /// Language used for localized values.
    pub language: &'a str,
    pub settings: &'a SiteSettings,
}

impl<'a> RenderContext<'a> {
    pub fn new(request_path: &'a str, settings: &'a SiteSettings) -> Self {
        Self {
            request_path,
            language: &settings.language,
            settings,
        }
    }

    pub fn with_language(mut self, language: &'a str) -> Self {
        self.language = language;
        self
    }
}

/// Computes the effective value of one tag for a resolved page.
///
/// Returning `None` leaves that tag's markers untouched.
pub type TagResolver = Arc<
    dyn Fn(&str, &SitemapNode, &DefaultTagTable, &RenderContext<'_>) -> Option<String>
        + Send
        + Sync,
>;

/// Registry of tag resolvers keyed by tag name.
#[derive(Clone)]
pub struct ResolverRegistry {
    resolvers: HashMap<String, TagResolver>,
    fallback: TagResolver,
}

impl ResolverRegistry {
    /// Registry with no keyed resolvers, only the fallback lookup.
    pub fn empty() -> Self {
        Self {
            resolvers: HashMap::new(),
            fallback: Arc::new(resolve_fallback),
        }
    }

    /// Register (or replace) the resolver for `key`.
    pub fn register<F>(&mut self, key: impl Into<String>, resolver: F) -> &mut Self
    where
        F: Fn(&str, &SitemapNode, &DefaultTagTable, &RenderContext<'_>) -> Option<String>
            + Send
            + Sync
            + 'static,
    {
        self.resolvers.insert(key.into(), Arc::new(resolver));
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.resolvers.contains_key(key)
    }

    /// Resolve the value of `key` for `item`.
    pub fn resolve(
        &self,
        key: &str,
        item: &SitemapNode,
        defaults: &DefaultTagTable,
        ctx: &RenderContext<'_>,
    ) -> Option<String> {
        let resolver = self.resolvers.get(key).unwrap_or(&self.fallback);
        resolver(key, item, defaults, ctx)
    }
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register("url", resolve_url)
            .register("description", resolve_description)
            .register("title", resolve_title)
            .register("image", resolve_image);
        registry
    }
}

impl fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.resolvers.keys().collect();
        keys.sort();
        f.debug_struct("ResolverRegistry")
            .field("keys", &keys)
            .finish()
    }
}

fn default_text<'d>(defaults: &'d DefaultTagTable, key: &str, language: &str) -> Option<&'d str> {
    defaults.get(key).and_then(|value| value.text(language))
}

/// Canonical url: site domain plus the request path. Page values are ignored.
pub fn resolve_url(
    _key: &str,
    _item: &SitemapNode,
    _defaults: &DefaultTagTable,
    ctx: &RenderContext<'_>,
) -> Option<String> {
    Some(format!("{}{}", ctx.settings.domain, ctx.request_path))
}

/// Page description in the active language, else the default's.
pub fn resolve_description(
    key: &str,
    item: &SitemapNode,
    defaults: &DefaultTagTable,
    ctx: &RenderContext<'_>,
) -> Option<String> {
    item.description
        .as_ref()
        .and_then(|map| map.get(ctx.language))
        .map(String::as_str)
        .or_else(|| default_text(defaults, key, ctx.language))
        .map(str::to_string)
}

/// `default | title | subtitle`, or the bare default when the page has no title.
pub fn resolve_title(
    key: &str,
    item: &SitemapNode,
    defaults: &DefaultTagTable,
    ctx: &RenderContext<'_>,
) -> Option<String> {
    let site_title = default_text(defaults, key, ctx.language);
    let Some(title) = item.title.as_deref() else {
        return site_title.map(str::to_string);
    };

    let site_title = site_title.unwrap_or_default();
    let separator = &ctx.settings.title_separator;
    let mut composed = format!("{site_title}{separator}{title}");
    if let Some(subtitle) = item.subtitle.as_deref() {
        composed.push_str(separator);
        composed.push_str(subtitle);
    }
    Some(composed)
}

/// Page image (or the default), rooted under the image root unless it is
/// already an absolute `http(s)` url.
pub fn resolve_image(
    key: &str,
    item: &SitemapNode,
    defaults: &DefaultTagTable,
    ctx: &RenderContext<'_>,
) -> Option<String> {
    let raw = item
        .tag_text(key, ctx.language)
        .filter(|text| !text.is_empty())
        .or_else(|| default_text(defaults, key, ctx.language))?;

    if raw.contains("http") {
        Some(raw.to_string())
    } else {
        Some(format!("{}{}", ctx.settings.image_root, raw))
    }
}

/// Page value when present and non-empty, else the default.
pub fn resolve_fallback(
    key: &str,
    item: &SitemapNode,
    defaults: &DefaultTagTable,
    ctx: &RenderContext<'_>,
) -> Option<String> {
    item.tag_text(key, ctx.language)
        .filter(|text| !text.is_empty())
        .or_else(|| default_text(defaults, key, ctx.language))
        .map(str::to_string)
}
