//! Initialize a new site configuration

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r#"# Site Configuration

# Site
title: Blog
language: en

# CMS
## Credentials can also come from MICROCMS_SERVICE_DOMAIN / MICROCMS_API_KEY,
## which take precedence over the values below.
service_domain: ''
api_key: ''
## Full API URL, overrides the one derived from service_domain
# api_base_url: https://example.microcms.io/api/v1
endpoints:
  blogs: blogs
  categories: categories
  tags: tags

# URL
root: /

# Directory
public_dir: public
i18n_dir: i18n

# Writing
## Hide drafts from the post list
production: false
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already exists", config_path);
    }

    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("i18n"))?;
    fs::write(&config_path, CONFIG_TEMPLATE)?;
    tracing::debug!("Wrote {:?}", config_path);

    Ok(())
}
