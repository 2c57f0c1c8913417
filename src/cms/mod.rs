//! HTTP client for the microCMS content API.

mod blog;
mod error;
mod models;
mod query;

pub use error::{CmsError, Result};
pub use models::{BlogPost, Category, Image, ListResponse, Tag};
pub use query::{Filter, ListQuery, PostQuery, DEFAULT_LIMIT, DEFAULT_ORDERS};

use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::config::{EndpointsConfig, SiteConfig};

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-microcms-api-key";

/// HTTP client for the CMS API.
#[derive(Debug, Clone)]
pub struct CmsClient {
    client: reqwest::Client,
    base_url: String,
    endpoints: EndpointsConfig,
}

impl CmsClient {
    /// Create a client from the site configuration.
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let base_url = config.api_base_url().ok_or_else(|| {
            CmsError::InvalidConfig(
                "service_domain is not set (MICROCMS_SERVICE_DOMAIN)".to_string(),
            )
        })?;

        let mut headers = HeaderMap::new();
        if !config.api_key.is_empty() {
            let mut value = HeaderValue::from_str(&config.api_key)
                .map_err(|e| CmsError::InvalidConfig(format!("Invalid API key: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        } else {
            tracing::warn!("No API key configured, requests will likely be rejected");
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url,
            endpoints: config.endpoints.clone(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Query a list endpoint.
    pub async fn list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &ListQuery,
    ) -> Result<ListResponse<T>> {
        let url = self.url(endpoint);
        tracing::debug!("GET {} {:?}", url, query);
        let response = self.client.get(&url).query(query).send().await?;
        self.handle_response(response, endpoint).await
    }

    /// Fetch a single content item by id.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str, content_id: &str) -> Result<T> {
        let path = format!("{}/{}", endpoint, content_id);
        let url = self.url(&path);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response, &path).await
    }

    /// Handle error responses.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(CmsError::from)
        } else if status.as_u16() == 404 {
            Err(CmsError::NotFound {
                resource: resource.to_string(),
            })
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(CmsError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}
