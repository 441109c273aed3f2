//! Tag compositing: effective tag values rewritten into the template.

use crate::error::Result;
use crate::markers::{chain, rewrite_title, AttributeMarker};
use crate::sitemap::SitemapNode;
use crate::tags::{DefaultTagTable, RenderContext, ResolverRegistry};
use std::borrow::Cow;
use tracing::{debug, warn};

/// Tag key whose value is also written into the `<title>` element.
pub const TITLE_KEY: &str = "title";

/// Outcome of one compositing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Found,
    NotFound,
}

impl Status {
    /// HTTP status code for this outcome.
    pub fn code(self) -> u16 {
        match self {
            Status::Found => 200,
            Status::NotFound => 404,
        }
    }
}

/// Rewritten document and its status. Borrows the template when untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition<'t> {
    pub html: Cow<'t, str>,
    pub status: Status,
}

/// Overlays page metadata onto the default tags and rewrites the template.
#[derive(Debug, Clone)]
pub struct TagCompositor {
    defaults: DefaultTagTable,
    markers: Vec<AttributeMarker>,
    registry: ResolverRegistry,
}

impl TagCompositor {
    /// Build a compositor with the built-in resolvers.
    pub fn new(defaults: DefaultTagTable) -> Result<Self> {
        Self::with_registry(defaults, ResolverRegistry::default())
    }

    /// Build a compositor with a custom resolver registry.
    pub fn with_registry(defaults: DefaultTagTable, registry: ResolverRegistry) -> Result<Self> {
        let markers = defaults
            .keys()
            .map(|key| AttributeMarker::new(key))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            defaults,
            markers,
            registry,
        })
    }

    pub fn defaults(&self) -> &DefaultTagTable {
        &self.defaults
    }

    /// Composite the template for a resolution result.
    ///
    /// `None` means the route was not found: the template is returned as is
    /// with [`Status::NotFound`]. Tags whose value cannot be resolved are
    /// skipped and leave their markers untouched.
    pub fn apply<'t>(
        &self,
        resolution: Option<&SitemapNode>,
        template: &'t str,
        ctx: &RenderContext<'_>,
    ) -> Composition<'t> {
        let Some(item) = resolution else {
            debug!(path = ctx.request_path, "route not found");
            return Composition {
                html: Cow::Borrowed(template),
                status: Status::NotFound,
            };
        };

        let mut html = Cow::Borrowed(template);
        for marker in &self.markers {
            let key = marker.key();
            let Some(value) = self.registry.resolve(key, item, &self.defaults, ctx) else {
                warn!(
                    key,
                    language = ctx.language,
                    path = ctx.request_path,
                    "no value for tag, leaving marker untouched"
                );
                continue;
            };

            html = chain(html, |text| marker.rewrite(text, &value));
            if key == TITLE_KEY {
                html = chain(html, |text| rewrite_title(text, &value));
            }
        }

        Composition {
            html,
            status: Status::Found,
        }
    }
}
