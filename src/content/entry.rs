//! Content entries in the shape the site frontend consumes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cms::BlogPost;

/// Name of the collection holding posts
pub const POSTS_COLLECTION: &str = "posts";

/// Characters per minute of reading time
const CHARS_PER_MINUTE: f64 = 200.0;

/// A post in the frontend's content-collection format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub id: String,
    pub slug: String,
    /// Post body
    pub body: String,
    pub collection: String,
    pub data: PostData,
    pub render: RenderMeta,
}

/// Front-matter of a post entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    pub title: String,
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub description: String,
    /// Cover image URL, empty when the post has none
    pub image: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub draft: bool,
    pub lang: String,

    // Neighbor links, filled in by `link_neighbors`
    pub prev_title: String,
    pub prev_slug: String,
    pub next_title: String,
    pub next_slug: String,
}

/// Values computed from the body when the entry is rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderMeta {
    pub excerpt: String,
    pub words: usize,
    pub minutes: usize,
}

impl RenderMeta {
    fn from_post(post: &BlogPost) -> Self {
        let words = post.content.encode_utf16().count();
        let minutes = ((words as f64 / CHARS_PER_MINUTE).round() as usize).max(1);
        Self {
            excerpt: post.description.clone().unwrap_or_default(),
            words,
            minutes,
        }
    }
}

/// Link to a neighboring post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborLink<'a> {
    pub slug: &'a str,
    pub title: &'a str,
}

impl CollectionEntry {
    /// The post published immediately before this one
    pub fn prev(&self) -> Option<NeighborLink<'_>> {
        neighbor(&self.data.prev_slug, &self.data.prev_title)
    }

    /// The post published immediately after this one
    pub fn next(&self) -> Option<NeighborLink<'_>> {
        neighbor(&self.data.next_slug, &self.data.next_title)
    }

    /// Drop the body, keeping what list pages need
    pub fn into_list_item(self) -> PostForList {
        PostForList {
            slug: self.slug,
            data: self.data,
        }
    }
}

fn neighbor<'a>(slug: &'a str, title: &'a str) -> Option<NeighborLink<'a>> {
    if slug.is_empty() {
        None
    } else {
        Some(NeighborLink { slug, title })
    }
}

impl From<&BlogPost> for CollectionEntry {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id.clone(),
            slug: post.id.clone(),
            body: post.content.clone(),
            collection: POSTS_COLLECTION.to_string(),
            data: PostData {
                title: post.title.clone(),
                published: post.published(),
                updated: post.updated_at,
                description: post.description.clone().unwrap_or_default(),
                image: post
                    .image
                    .as_ref()
                    .map(|i| i.url.clone())
                    .unwrap_or_default(),
                tags: post
                    .tags
                    .iter()
                    .flatten()
                    .map(|t| t.name.clone())
                    .collect(),
                category: post.category.as_ref().map(|c| c.name.clone()),
                draft: post.draft.unwrap_or(false),
                lang: String::new(),
                prev_title: String::new(),
                prev_slug: String::new(),
                next_title: String::new(),
                next_slug: String::new(),
            },
            render: RenderMeta::from_post(post),
        }
    }
}

/// A post entry without its body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostForList {
    pub slug: String,
    pub data: PostData,
}
