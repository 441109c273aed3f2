//! Sitemap data model and path-to-node resolution.
//!
//! A sitemap maps path segments to nodes. A node may carry its own nested
//! sitemap under `items`, so `/shop/shoes` is found by looking up `shop` and
//! then `shoes` inside its items.

use crate::tags::TagValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Mapping from path segment to route node. The empty segment is home.
pub type Sitemap = BTreeMap<String, SitemapNode>;

/// One addressable route and its page metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SitemapNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Page description keyed by language code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<BTreeMap<String, String>>,
    /// Nested routes below this segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Sitemap>,
    /// Any other tag overrides (`image`, `type`, `locale`, ...).
    #[serde(flatten)]
    pub fields: BTreeMap<String, TagValue>,
}

impl SitemapNode {
    /// Node with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Attach nested routes.
    pub fn with_items(mut self, items: Sitemap) -> Self {
        self.items = Some(items);
        self
    }

    /// Set an extra tag field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Look up an extra tag field by key.
    pub fn field(&self, key: &str) -> Option<&TagValue> {
        self.fields.get(key)
    }

    /// Page text for any tag key, including the dedicated `title`,
    /// `subtitle` and `description` fields.
    pub fn tag_text(&self, key: &str, language: &str) -> Option<&str> {
        match key {
            "title" => self.title.as_deref(),
            "subtitle" => self.subtitle.as_deref(),
            "description" => self.description.as_ref()?.get(language).map(String::as_str),
            _ => self.field(key)?.text(language),
        }
    }

    /// Nested sitemap, if present and non-empty.
    pub fn children(&self) -> Option<&Sitemap> {
        self.items.as_ref().filter(|items| !items.is_empty())
    }
}

/// The sitemap used when configuration declares none.
pub fn default_sitemap() -> Sitemap {
    let mut map = Sitemap::new();
    map.insert(String::new(), SitemapNode::titled("Home"));
    map
}

/// Resolve a request path to its sitemap node.
///
/// `base_prefix` is stripped from the front of `path` when present, so a site
/// mounted under a sub-path can declare keys relative to its mount point.
/// Returns `None` when no node matches, including paths that descend past a
/// node without `items`.
pub fn resolve<'a>(
    path: &str,
    sitemap: &'a Sitemap,
    separator: &str,
    base_prefix: &str,
) -> Option<&'a SitemapNode> {
    let path = if base_prefix.is_empty() {
        path
    } else {
        path.strip_prefix(base_prefix).unwrap_or(path)
    };

    let segments: Vec<&str> = path.split(separator).collect();
    let node = resolve_segments(&segments, sitemap);
    debug!(path, found = node.is_some(), "sitemap resolution");
    node
}

/// One level of descent. A single trailing empty segment is dropped at every
/// level, so `/shop//` resolves like `/shop/`.
fn resolve_segments<'a>(segments: &[&str], sitemap: &'a Sitemap) -> Option<&'a SitemapNode> {
    let segments = match segments.split_last() {
        Some((&"", rest)) => rest,
        _ => segments,
    };

    let (current, remaining) = match segments.split_first() {
        Some((first, rest)) => (*first, rest),
        None => ("", &[][..]),
    };

    if remaining.is_empty() {
        return sitemap.get(current);
    }

    let children = sitemap.get(current)?.children()?;
    resolve_segments(remaining, children)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Sitemap {
        let mut pages = Sitemap::new();
        pages.insert("shop".to_string(), SitemapNode::titled("Shop"));
        pages.insert("about".to_string(), SitemapNode::titled("About"));

        let mut map = Sitemap::new();
        map.insert(String::new(), SitemapNode::titled("Home").with_items(pages));
        map.insert("legacy".to_string(), SitemapNode::titled("Legacy"));
        map
    }

    fn title(node: Option<&SitemapNode>) -> Option<&str> {
        node.and_then(|n| n.title.as_deref())
    }

    #[test]
    fn test_home_path() {
        let map = sample();
        assert_eq!(title(resolve("/", &map, "/", "")), Some("Home"));
        assert_eq!(title(resolve("", &map, "/", "")), Some("Home"));
    }

    #[test]
    fn test_top_level_key_without_leading_separator() {
        let map = sample();
        assert_eq!(title(resolve("legacy", &map, "/", "")), Some("Legacy"));
        assert_eq!(title(resolve("legacy/", &map, "/", "")), Some("Legacy"));
    }

    #[test]
    fn test_nested_resolution() {
        let map = sample();
        assert_eq!(title(resolve("/shop", &map, "/", "")), Some("Shop"));
        assert_eq!(title(resolve("/shop/", &map, "/", "")), Some("Shop"));
        assert!(resolve("/shop/x", &map, "/", "").is_none());
    }

    #[test]
    fn test_trailing_separator_dropped_per_level() {
        let map = sample();
        assert_eq!(title(resolve("/shop//", &map, "/", "")), Some("Shop"));
        assert_eq!(title(resolve("/app/about//", &map, "/", "/app")), Some("About"));
        assert_eq!(title(resolve("legacy//", &map, "/", "")), None);
        assert!(resolve("//", &map, "/", "").is_none());
        assert!(resolve("/shop///", &map, "/", "").is_none());
    }

    #[test]
    fn test_descending_past_leaf_is_not_found() {
        let map = sample();
        assert!(resolve("/about/team", &map, "/", "").is_none());
        assert!(resolve("legacy/x", &map, "/", "").is_none());
        assert!(resolve("/missing", &map, "/", "").is_none());
    }

    #[test]
    fn test_base_prefix_strip() {
        let map = sample();
        let stripped = resolve("/app/about", &map, "/", "/app");
        assert_eq!(stripped, resolve("/about", &map, "/", ""));
        assert_eq!(title(stripped), Some("About"));
        assert_eq!(title(resolve("/app/", &map, "/", "/app")), Some("Home"));
        assert_eq!(title(resolve("/app", &map, "/", "/app")), Some("Home"));
    }

    #[test]
    fn test_base_prefix_absent_leaves_path() {
        let map = sample();
        assert_eq!(title(resolve("/about", &map, "/", "/app")), Some("About"));
    }

    #[test]
    fn test_empty_items_do_not_descend() {
        let mut map = Sitemap::new();
        map.insert(
            "docs".to_string(),
            SitemapNode::titled("Docs").with_items(Sitemap::new()),
        );
        assert!(resolve("docs/intro", &map, "/", "").is_none());
        assert_eq!(title(resolve("docs", &map, "/", "")), Some("Docs"));
    }

    #[test]
    fn test_custom_separator() {
        let mut inner = Sitemap::new();
        inner.insert("b".to_string(), SitemapNode::titled("B"));
        let mut map = Sitemap::new();
        map.insert("a".to_string(), SitemapNode::default().with_items(inner));
        assert_eq!(title(resolve("a.b", &map, ".", "")), Some("B"));
    }

    #[test]
    fn test_empty_node_is_found() {
        let mut map = Sitemap::new();
        map.insert("blank".to_string(), SitemapNode::default());
        let node = resolve("blank", &map, "/", "");
        assert!(node.is_some());
        assert!(title(node).is_none());
    }

    #[test]
    fn test_default_sitemap_has_home() {
        let map = default_sitemap();
        assert_eq!(title(resolve("/", &map, "/", "")), Some("Home"));
    }

    #[test]
    fn test_tag_text_covers_dedicated_fields() {
        let mut node = SitemapNode::titled("About").with_field("image", "a.jpg");
        node.subtitle = Some("Company".to_string());
        node.description = Some(BTreeMap::from([("en".to_string(), "Hi".to_string())]));

        assert_eq!(node.tag_text("title", "en"), Some("About"));
        assert_eq!(node.tag_text("subtitle", "en"), Some("Company"));
        assert_eq!(node.tag_text("description", "en"), Some("Hi"));
        assert_eq!(node.tag_text("description", "fr"), None);
        assert_eq!(node.tag_text("image", "en"), Some("a.jpg"));
        assert_eq!(node.tag_text("locale", "en"), None);
    }

    #[test]
    fn test_non_text_fields_still_load() {
        let json = r#"{
            "": {
                "title": "Home",
                "priority": 0.8,
                "indexed": true,
                "meta": { "tags": ["a", "b"] },
                "items": { "shop": { "title": "Shop", "changefreq": null } }
            }
        }"#;
        let map: Sitemap = serde_json::from_str(json).unwrap();
        let home = &map[""];
        assert!(matches!(home.field("priority"), Some(TagValue::Other(_))));
        assert_eq!(home.tag_text("indexed", "en"), None);
        assert_eq!(home.tag_text("meta", "en"), None);
        assert_eq!(title(resolve("/shop", &map, "/", "")), Some("Shop"));
    }

    #[test]
    fn test_deserialize_nested_with_fields() {
        let json = r#"{
            "": {
                "title": "Home",
                "image": "home.jpg",
                "items": { "shop": { "title": "Shop", "description": { "en": "Buy" } } }
            }
        }"#;
        let map: Sitemap = serde_json::from_str(json).unwrap();
        let home = &map[""];
        assert_eq!(home.field("image"), Some(&TagValue::from("home.jpg")));
        assert!(home.field("items").is_none());
        let shop = resolve("/shop", &map, "/", "").unwrap();
        assert_eq!(
            shop.description.as_ref().and_then(|d| d.get("en")).map(String::as_str),
            Some("Buy")
        );
    }
}
