//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable holding the microCMS service domain
pub const SERVICE_DOMAIN_ENV: &str = "MICROCMS_SERVICE_DOMAIN";

/// Environment variable holding the microCMS API key
pub const API_KEY_ENV: &str = "MICROCMS_API_KEY";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,

    // CMS
    pub service_domain: String,
    pub api_key: String,
    /// Full API base URL, overrides the one derived from `service_domain`
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    // URL
    pub root: String,

    // Directory
    pub public_dir: String,
    pub i18n_dir: String,

    // Writing
    /// Hide drafts from the sorted post list
    pub production: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            language: "en".to_string(),

            service_domain: String::new(),
            api_key: String::new(),
            api_base_url: None,
            endpoints: EndpointsConfig::default(),

            root: "/".to_string(),

            public_dir: "public".to_string(),
            i18n_dir: "i18n".to_string(),

            production: false,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply credentials from the environment on top of the file values
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(SERVICE_DOMAIN_ENV).ok(),
            std::env::var(API_KEY_ENV).ok(),
        );
    }

    /// Override the service domain and API key when a non-empty value is given
    pub fn apply_overrides(&mut self, service_domain: Option<String>, api_key: Option<String>) {
        if let Some(domain) = service_domain.filter(|d| !d.trim().is_empty()) {
            tracing::debug!("Using service domain from {}", SERVICE_DOMAIN_ENV);
            self.service_domain = domain.trim().to_string();
        }
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            tracing::debug!("Using API key from {}", API_KEY_ENV);
            self.api_key = key.trim().to_string();
        }
    }

    /// The API base URL, e.g. `https://my-blog.microcms.io/api/v1`
    ///
    /// Returns `None` when neither a base URL override nor a service
    /// domain is configured.
    pub fn api_base_url(&self) -> Option<String> {
        if let Some(url) = self.api_base_url.as_deref().filter(|u| !u.is_empty()) {
            return Some(url.trim_end_matches('/').to_string());
        }
        if self.service_domain.is_empty() {
            return None;
        }
        Some(format!(
            "https://{}.microcms.io/api/v1",
            self.service_domain
        ))
    }
}

/// Names of the CMS API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub blogs: String,
    pub categories: String,
    pub tags: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            blogs: "blogs".to_string(),
            categories: "categories".to_string(),
            tags: "tags".to_string(),
        }
    }
}
