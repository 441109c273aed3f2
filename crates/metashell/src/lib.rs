//! Per-route document metadata for a single static HTML shell.
//!
//! A single-page site ships one `index.html`. This crate resolves the request
//! path against a declared sitemap, overlays the matching page's metadata onto
//! site-wide defaults, and rewrites the shell's `og:*` and `<title>` markers so
//! every route is served with its own title, description, image and url.
//!
//! ```
//! use metashell::{MetaShell, SiteConfig};
//!
//! let config = SiteConfig::from_json_str(r#"{
//!     "domain": "https://example.com",
//!     "default_tags": { "title": "Example" },
//!     "sitemap": {
//!         "": { "title": "Home", "items": { "about": { "title": "About" } } }
//!     }
//! }"#).unwrap();
//! let template = r#"<title></title><meta property="og:title" content="">"#;
//! let shell = MetaShell::new(config, template).unwrap();
//!
//! let page = shell.render("/about");
//! assert_eq!(page.status.code(), 200);
//! assert!(page.html.contains("<title>Example | About</title>"));
//! ```

pub mod compositor;
pub mod config;
pub mod error;
pub mod markers;
pub mod shell;
pub mod sitemap;
pub mod tags;

pub use compositor::{Composition, Status, TagCompositor};
pub use config::{SiteConfig, SiteSettings};
pub use error::{Error, Result};
pub use shell::{MetaShell, Rendered};
pub use sitemap::{resolve, Sitemap, SitemapNode};
pub use tags::{DefaultTagTable, RenderContext, ResolverRegistry, TagValue};
