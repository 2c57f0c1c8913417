//! Content module - adapts CMS posts into content-collection entries

mod collection;
mod entry;

pub use collection::{
    count_categories, count_tags, link_neighbors, NameOrder, CategoryCount,
    ContentCollection, TagCount, AGGREGATE_LIMIT,
};
pub use entry::{CollectionEntry, NeighborLink, PostData, PostForList, RenderMeta, POSTS_COLLECTION};
