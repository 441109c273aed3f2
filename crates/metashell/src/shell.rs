//! The shell: one template, one sitemap, rendered per request path.

use crate::compositor::{Status, TagCompositor};
use crate::config::{SiteConfig, SiteSettings};
use crate::error::Result;
use crate::sitemap::{self, Sitemap, SitemapNode};
use crate::tags::{RenderContext, ResolverRegistry};

/// A rendered document ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub status: Status,
}

/// Resolves request paths and composites the shell template.
///
/// Immutable after construction and safe to share between request handlers.
#[derive(Debug, Clone)]
pub struct MetaShell {
    settings: SiteSettings,
    sitemap: Sitemap,
    compositor: TagCompositor,
    template: String,
}

impl MetaShell {
    /// Build a shell from configuration and template text.
    pub fn new(config: SiteConfig, template: impl Into<String>) -> Result<Self> {
        Self::with_registry(config, template, ResolverRegistry::default())
    }

    /// Build a shell with custom tag resolvers.
    pub fn with_registry(
        config: SiteConfig,
        template: impl Into<String>,
        registry: ResolverRegistry,
    ) -> Result<Self> {
        let compositor = TagCompositor::with_registry(config.default_tags, registry)?;
        Ok(Self {
            settings: config.settings,
            sitemap: config.sitemap,
            compositor,
            template: template.into(),
        })
    }

    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Find the sitemap node for a request path.
    pub fn resolve(&self, path: &str) -> Option<&SitemapNode> {
        sitemap::resolve(
            path,
            &self.sitemap,
            &self.settings.path_separator,
            &self.settings.base_prefix,
        )
    }

    /// Render the stored template for `path` in the configured language.
    pub fn render(&self, path: &str) -> Rendered {
        self.render_template(path, &self.template, None)
    }

    /// Render the stored template for `path` in the given language.
    pub fn render_in(&self, path: &str, language: &str) -> Rendered {
        self.render_template(path, &self.template, Some(language))
    }

    /// Render a freshly supplied template instead of the stored one.
    pub fn render_template(&self, path: &str, template: &str, language: Option<&str>) -> Rendered {
        let mut ctx = RenderContext::new(path, &self.settings);
        if let Some(language) = language {
            ctx = ctx.with_language(language);
        }

        let composition = self.compositor.apply(self.resolve(path), template, &ctx);
        Rendered {
            html: composition.html.into_owned(),
            status: composition.status,
        }
    }
}
