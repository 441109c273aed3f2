//! Site configuration: scalar settings, default tags and the sitemap.
//!
//! Configuration is a single JSON document. Every field is optional; a
//! missing sitemap falls back to a lone home route.

use crate::error::{Error, Result};
use crate::sitemap::{default_sitemap, Sitemap};
use crate::tags::DefaultTagTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_TITLE_SEPARATOR: &str = " | ";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_PATH_SEPARATOR: &str = "/";

/// Scalar settings shared by every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Site origin prepended to the request path for `og:url`.
    pub domain: String,
    /// Prefix for relative image paths.
    pub image_root: String,
    /// Mount point stripped from request paths before resolution.
    pub base_prefix: String,
    pub path_separator: String,
    pub title_separator: String,
    /// Language used for localized values unless a request overrides it.
    pub language: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            domain: String::new(),
            image_root: String::new(),
            base_prefix: String::new(),
            path_separator: DEFAULT_PATH_SEPARATOR.to_string(),
            title_separator: DEFAULT_TITLE_SEPARATOR.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Full site configuration as loaded from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(flatten)]
    pub settings: SiteSettings,
    /// Template path, relative to the configuration file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    #[serde(default)]
    pub default_tags: DefaultTagTable,
    #[serde(default = "default_sitemap")]
    pub sitemap: Sitemap,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            settings: SiteSettings::default(),
            template: None,
            default_tags: DefaultTagTable::new(),
            sitemap: default_sitemap(),
        }
    }
}

impl SiteConfig {
    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    ///
    /// A relative `template` path is resolved against the file's directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = serde_json::from_str(&json).map_err(|source| Error::JsonFile {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        if let (Some(template), Some(dir)) = (config.template.as_mut(), path.parent()) {
            if template.is_relative() {
                *template = dir.join(&*template);
            }
        }

        info!(
            path = %path.display(),
            routes = config.sitemap.len(),
            tags = config.default_tags.len(),
            "loaded site configuration"
        );
        Ok(config)
    }

    /// Read the template file named by this configuration.
    pub fn load_template(&self) -> Result<Option<String>> {
        let Some(path) = &self.template else {
            return Ok(None);
        };
        std::fs::read_to_string(path)
            .map(Some)
            .map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })
    }

    fn validate(&self) -> Result<()> {
        if self.settings.path_separator.is_empty() {
            return Err(Error::InvalidSeparator);
        }
        Ok(())
    }
}
