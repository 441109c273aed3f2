//! In-template metadata markers and their rewrites.
//!
//! Two marker syntaxes are recognised:
//!
//! 1. **Attribute marker**, one per tag key, possibly repeated:
//!    `property="og:{key}" content="..."`
//! 2. **Title element**, a singleton: `<title>...</title>`
//!
//! Only the value region of a marker is ever replaced. Everything else in the
//! template is passed through byte for byte.

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(<title>)[^<>]*(</title>)").expect("title regex is valid"));

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);")
        .expect("entity regex is valid")
});

/// Attribute-style marker for a single tag key.
#[derive(Debug, Clone)]
pub struct AttributeMarker {
    key: String,
    pattern: Regex,
}

impl AttributeMarker {
    /// Compile the marker pattern for `key`. The key is matched literally.
    pub fn new(key: &str) -> Result<Self> {
        let source = format!(
            r#"(property="og:{}"\s*content=")[^"]*(")"#,
            regex::escape(key)
        );
        let pattern = Regex::new(&source).map_err(|source| Error::Marker {
            key: key.to_string(),
            source,
        })?;

        Ok(Self {
            key: key.to_string(),
            pattern,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the `content` of every marker for this key with `value`.
    ///
    /// Borrows `text` unchanged when the template has no such marker.
    pub fn rewrite<'t>(&self, text: &'t str, value: &str) -> Cow<'t, str> {
        let value = escape_html(value);
        self.pattern
            .replace_all(text, |caps: &Captures<'_>| {
                format!("{}{}{}", &caps[1], value, &caps[2])
            })
    }
}

/// Replace the inner text of the `<title>` element with `value`.
pub fn rewrite_title<'t>(text: &'t str, value: &str) -> Cow<'t, str> {
    let value = escape_html(value);
    TITLE_RE.replace(text, |caps: &Captures<'_>| {
        format!("{}{}{}", &caps[1], value, &caps[2])
    })
}

/// Escape text for use inside an attribute value or element body.
///
/// Character references already present (`&amp;`, `&#39;`, `&#x2014;`) are
/// kept as they are, so configuration may hold raw or pre-escaped text.
pub fn escape_html(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for (i, c) in value.char_indices() {
        match c {
            '&' if ENTITY_RE.is_match(&value[i..]) => escaped.push('&'),
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Apply `rewrite` to `text`, keeping the original borrow when nothing changed.
pub(crate) fn chain<'t>(
    text: Cow<'t, str>,
    rewrite: impl for<'s> FnOnce(&'s str) -> Cow<'s, str>,
) -> Cow<'t, str> {
    match text {
        Cow::Borrowed(borrowed) => rewrite(borrowed),
        Cow::Owned(owned) => {
            let next = match rewrite(&owned) {
                Cow::Owned(next) => Some(next),
                Cow::Borrowed(_) => None,
            };
            Cow::Owned(next.unwrap_or(owned))
        }
    }
}
