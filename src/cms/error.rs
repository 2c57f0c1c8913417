//! CMS client error types.

use thiserror::Error;

/// Result type alias for the CMS client.
pub type Result<T> = std::result::Result<T, CmsError>;

/// Errors that can occur while talking to the CMS API.
#[derive(Error, Debug)]
pub enum CmsError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("CMS returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Content not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
