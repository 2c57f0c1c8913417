//! Export the content views as JSON files

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::content::{CategoryCount, CollectionEntry, TagCount};
use crate::Site;

/// Everything written by an export
#[derive(Debug, Clone)]
pub struct Views {
    pub posts: Vec<CollectionEntry>,
    pub tags: Vec<TagCount>,
    pub categories: Vec<CategoryCount>,
}

/// Fetch the views and write them under the public directory
pub async fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();
    let content = site.content()?;

    let views = Views {
        posts: content.get_sorted_posts().await?,
        tags: content.get_tag_list().await?,
        categories: content.get_category_list().await?,
    };
    tracing::info!(
        "Fetched {} posts, {} tags and {} categories",
        views.posts.len(),
        views.tags.len(),
        views.categories.len()
    );

    write_views(&site.public_dir, &views)?;

    let duration = start.elapsed();
    tracing::info!(
        "Exported to {:?} in {:.2}s",
        site.public_dir,
        duration.as_secs_f64()
    );
    Ok(())
}

/// Write `posts.json`, `posts/{slug}.json`, `tags.json` and `categories.json`
pub fn write_views(dir: &Path, views: &Views) -> Result<()> {
    let posts_dir = dir.join("posts");
    fs::create_dir_all(&posts_dir)?;

    let list: Vec<_> = views
        .posts
        .iter()
        .cloned()
        .map(CollectionEntry::into_list_item)
        .collect();
    write_json(&dir.join("posts.json"), &list)?;

    for entry in &views.posts {
        write_json(&posts_dir.join(format!("{}.json", entry.slug)), entry)?;
    }

    write_json(&dir.join("tags.json"), &views.tags)?;
    write_json(&dir.join("categories.json"), &views.categories)?;

    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostForList;
    use crate::test_support::{fake_cms, sample_fixture};

    #[tokio::test]
    async fn test_export_writes_views() {
        let server = fake_cms(sample_fixture()).await;
        let dir = tempfile::tempdir().unwrap();
        let site = Site::from_config(server.config(), dir.path());

        site.export().await.unwrap();

        let list: Vec<PostForList> =
            serde_json::from_str(&fs::read_to_string(site.public_dir.join("posts.json")).unwrap())
                .unwrap();
        let slugs: Vec<_> = list.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["post-a", "post-b", "post-c"]);
        assert_eq!(list[0].data.prev_slug, "post-b");

        let entry: CollectionEntry = serde_json::from_str(
            &fs::read_to_string(site.public_dir.join("posts/post-b.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(entry.body, "<p>B body</p>");
        assert_eq!(entry.data.next_title, "A");

        let tags: Vec<TagCount> =
            serde_json::from_str(&fs::read_to_string(site.public_dir.join("tags.json")).unwrap())
                .unwrap();
        assert_eq!(tags.len(), 3);

        let categories: Vec<CategoryCount> = serde_json::from_str(
            &fs::read_to_string(site.public_dir.join("categories.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(categories[2].url, "/archive/?uncategorized=true");
    }

    #[test]
    fn test_write_empty_views() {
        let dir = tempfile::tempdir().unwrap();
        let views = Views {
            posts: Vec::new(),
            tags: Vec::new(),
            categories: Vec::new(),
        };

        write_views(dir.path(), &views).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("posts.json")).unwrap(),
            "[]"
        );
        assert!(dir.path().join("posts").is_dir());
    }
}
