//! microcms-content: blog content from microCMS for static sites
//!
//! This crate fetches posts, categories and tags from the microCMS API and
//! adapts them into content-collection entries, together with the derived
//! views a blog frontend needs: the sorted post list with previous/next
//! links, tag counts and category counts.

pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod i18n;
pub mod server;

#[cfg(test)]
pub(crate) mod test_support;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// The site: configuration, directories and translations
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Translations for the configured language
    pub i18n: i18n::I18n,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (export) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Load a site from a directory
    ///
    /// Reads `_config.yml` when present, then applies credentials from the
    /// environment. Language files are loaded as in [`Site::from_config`].
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::from_config(config, base_dir))
    }

    /// Build a site from an already loaded configuration
    ///
    /// A language directory that cannot be read is skipped with a warning and
    /// the built-in labels are used.
    pub fn from_config<P: AsRef<Path>>(config: config::SiteConfig, base_dir: P) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();

        let mut i18n = i18n::I18n::with_defaults(&config.language);
        if let Err(e) = i18n.load_languages(base_dir.join(&config.i18n_dir)) {
            tracing::warn!("Failed to load language files: {}", e);
        }

        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            i18n,
            base_dir,
            public_dir,
        }
    }

    /// Content collection backed by the configured CMS
    pub fn content(&self) -> Result<content::ContentCollection<'_>> {
        content::ContentCollection::new(self)
    }

    /// Export the views as JSON files
    pub async fn export(&self) -> Result<()> {
        commands::export::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
