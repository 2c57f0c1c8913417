//! Blog API operations.

use super::{BlogPost, Category, CmsClient, Filter, ListQuery, ListResponse, PostQuery, Result, Tag};

impl CmsClient {
    /// List blog posts.
    ///
    /// Defaults: limit 100, offset 0, ordered by `-publishedAt`.
    pub async fn get_blog_posts(&self, options: PostQuery) -> Result<ListResponse<BlogPost>> {
        self.list(&self.endpoints.blogs, &options.into_list_query())
            .await
    }

    /// Get a blog post by content id.
    pub async fn get_blog_post(&self, content_id: &str) -> Result<BlogPost> {
        self.get(&self.endpoints.blogs, content_id).await
    }

    /// List categories.
    pub async fn get_categories(&self) -> Result<ListResponse<Category>> {
        self.list(&self.endpoints.categories, &ListQuery::default())
            .await
    }

    /// List tags.
    pub async fn get_tags(&self) -> Result<ListResponse<Tag>> {
        self.list(&self.endpoints.tags, &ListQuery::default())
            .await
    }

    /// List blog posts in a category, newest first.
    pub async fn get_blog_posts_by_category(
        &self,
        category_id: &str,
    ) -> Result<ListResponse<BlogPost>> {
        self.get_blog_posts(PostQuery::new().filters(Filter::equals("category", category_id)))
            .await
    }

    /// List blog posts carrying a tag, newest first.
    pub async fn get_blog_posts_by_tag(&self, tag_id: &str) -> Result<ListResponse<BlogPost>> {
        self.get_blog_posts(PostQuery::new().filters(Filter::contains("tags", tag_id)))
            .await
    }
}
