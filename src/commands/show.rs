//! Show a single post

use anyhow::Result;

use crate::Site;

/// Print the entry for `slug` as JSON
pub async fn run(site: &Site, slug: &str) -> Result<()> {
    let content = site.content()?;

    match content.get_post_by_slug(slug).await {
        Some(entry) => {
            println!("{}", serde_json::to_string_pretty(&entry)?);
            Ok(())
        }
        None => anyhow::bail!("No post found with slug: {}", slug),
    }
}
