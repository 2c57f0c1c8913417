//! Content collection - fetches posts from the CMS and derives the list views

use anyhow::Result;
use icu_collator::{Collator, CollatorOptions, Strength};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use super::{CollectionEntry, PostForList};
use crate::cms::{BlogPost, CmsClient, Filter, PostQuery, DEFAULT_ORDERS};
use crate::helpers::category_url;
use crate::Site;

/// How many posts the taxonomy views count over
pub const AGGREGATE_LIMIT: u32 = 1000;

/// A tag and the number of posts carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// A category, its post count and archive URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
    pub url: String,
}

/// Reads posts and taxonomies from the CMS for one render
pub struct ContentCollection<'a> {
    site: &'a Site,
    client: CmsClient,
}

impl<'a> ContentCollection<'a> {
    /// Create a collection with a client built from the site configuration
    pub fn new(site: &'a Site) -> Result<Self> {
        let client = CmsClient::new(&site.config)?;
        Ok(Self::with_client(site, client))
    }

    /// Create a collection sharing an existing client
    pub fn with_client(site: &'a Site, client: CmsClient) -> Self {
        Self { site, client }
    }

    /// All posts, newest first, with neighbor links set
    ///
    /// Drafts are left out in production mode.
    pub async fn get_sorted_posts(&self) -> Result<Vec<CollectionEntry>> {
        let mut query = PostQuery::new().orders(DEFAULT_ORDERS);
        if self.site.config.production {
            query = query.filters(Filter::equals("draft", "false"));
        }

        let response = self.client.get_blog_posts(query).await?;
        tracing::debug!(
            "Fetched {} of {} posts",
            response.contents.len(),
            response.total_count
        );

        let mut sorted: Vec<CollectionEntry> =
            response.contents.iter().map(CollectionEntry::from).collect();
        sorted.sort_by(|a, b| b.data.published.cmp(&a.data.published));
        link_neighbors(&mut sorted);

        Ok(sorted)
    }

    /// Sorted posts without their bodies
    pub async fn get_sorted_posts_list(&self) -> Result<Vec<PostForList>> {
        let posts = self.get_sorted_posts().await?;
        Ok(posts
            .into_iter()
            .map(CollectionEntry::into_list_item)
            .collect())
    }

    /// Tags with post counts, sorted by name
    pub async fn get_tag_list(&self) -> Result<Vec<TagCount>> {
        let (tags, posts) = tokio::try_join!(
            self.client.get_tags(),
            self.client
                .get_blog_posts(PostQuery::new().limit(AGGREGATE_LIMIT)),
        )?;

        let counts = count_tags(&posts.contents);
        tracing::debug!(
            "{} tags defined, {} used by {} posts",
            tags.total_count,
            counts.len(),
            posts.contents.len()
        );
        Ok(counts)
    }

    /// Categories with post counts and archive URLs, sorted by name
    ///
    /// Posts without a category are counted under the localized
    /// "uncategorized" label.
    pub async fn get_category_list(&self) -> Result<Vec<CategoryCount>> {
        let (categories, posts) = tokio::try_join!(
            self.client.get_categories(),
            self.client
                .get_blog_posts(PostQuery::new().limit(AGGREGATE_LIMIT)),
        )?;

        let uncategorized = self.site.i18n.uncategorized();
        let counts = count_categories(&posts.contents, &uncategorized)
            .into_iter()
            .map(|(name, count)| CategoryCount {
                url: category_url(&self.site.config, &uncategorized, &name),
                name,
                count,
            })
            .collect::<Vec<_>>();
        tracing::debug!(
            "{} categories defined, {} used by {} posts",
            categories.total_count,
            counts.len(),
            posts.contents.len()
        );
        Ok(counts)
    }

    /// Look up a single post by slug
    ///
    /// Returns `None` when no post has this slug, and also when the lookup
    /// itself fails; the failure is logged.
    pub async fn get_post_by_slug(&self, slug: &str) -> Option<CollectionEntry> {
        let query = PostQuery::new().filters(Filter::equals("id", slug)).limit(1);
        match self.client.get_blog_posts(query).await {
            Ok(response) => response.contents.first().map(CollectionEntry::from),
            Err(e) => {
                tracing::error!("Error fetching post {}: {}", slug, e);
                None
            }
        }
    }
}

/// Set previous/next links on posts sorted newest first
///
/// "next" is the newer neighbor (the element before), "prev" the older one
/// (the element after).
pub fn link_neighbors(sorted: &mut [CollectionEntry]) {
    for i in 1..sorted.len() {
        let (newer, rest) = sorted.split_at_mut(i);
        let newer = &mut newer[i - 1];
        let current = &mut rest[0];

        current.data.next_slug = newer.slug.clone();
        current.data.next_title = newer.data.title.clone();
        newer.data.prev_slug = current.slug.clone();
        newer.data.prev_title = current.data.title.clone();
    }
}

/// Count how many posts carry each tag
pub fn count_tags(posts: &[BlogPost]) -> Vec<TagCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for post in posts {
        for tag in post.tags.iter().flatten() {
            *counts.entry(tag.name.clone()).or_insert(0) += 1;
        }
    }

    sort_counts(counts)
        .into_iter()
        .map(|(name, count)| TagCount { name, count })
        .collect()
}

/// Count how many posts fall in each category
///
/// Category names are trimmed. Posts without a category count under
/// `uncategorized`.
pub fn count_categories(posts: &[BlogPost], uncategorized: &str) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for post in posts {
        let name = match &post.category {
            Some(category) => category.name.trim().to_string(),
            None => uncategorized.to_string(),
        };
        *counts.entry(name).or_insert(0) += 1;
    }

    sort_counts(counts)
}

fn sort_counts(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let order = NameOrder::new();
    let mut sorted: Vec<_> = counts.into_iter().collect();
    sorted.sort_by(|a, b| order.compare(&a.0, &b.0));
    sorted
}

/// Case-insensitive, locale-collated name order
///
/// Names are lowercased and compared with the root-locale collator, so
/// accented letters sort next to their base letter. Names that still compare
/// equal are ordered by their exact text so the result does not depend on
/// map iteration order.
pub struct NameOrder {
    collator: Option<Collator>,
}

impl NameOrder {
    pub fn new() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Secondary);
        let collator = match Collator::try_new(&Default::default(), options) {
            Ok(collator) => Some(collator),
            Err(e) => {
                tracing::warn!("Collation data unavailable, sorting by code point: {:?}", e);
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let (lower_a, lower_b) = (a.to_lowercase(), b.to_lowercase());
        let collated = match &self.collator {
            Some(collator) => collator.compare(&lower_a, &lower_b),
            None => lower_a.cmp(&lower_b),
        };
        collated.then_with(|| a.cmp(b))
    }
}

impl Default for NameOrder {
    fn default() -> Self {
        Self::new()
    }
}
