//! List site content

use anyhow::Result;

use crate::helpers::tag_url;
use crate::Site;

/// List site content by type
pub async fn run(site: &Site, content_type: &str) -> Result<()> {
    let content = site.content()?;

    match content_type {
        "post" | "posts" => {
            let posts = content.get_sorted_posts_list().await?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                let draft = if post.data.draft { " (draft)" } else { "" };
                println!(
                    "  {} - {} [{}]{}",
                    post.data.published.format("%Y-%m-%d"),
                    post.data.title,
                    post.slug,
                    draft
                );
            }
        }
        "tag" | "tags" => {
            let tags = content.get_tag_list().await?;
            println!("Tags ({}):", tags.len());
            for tag in tags {
                println!(
                    "  {} ({}) {}",
                    tag.name,
                    tag.count,
                    tag_url(&site.config, &tag.name)
                );
            }
        }
        "category" | "categories" => {
            let categories = content.get_category_list().await?;
            println!("Categories ({}):", categories.len());
            for category in categories {
                println!("  {} ({}) {}", category.name, category.count, category.url);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(())
}
