//! Configuration module

mod site;

pub use site::EndpointsConfig;
pub use site::SiteConfig;
pub use site::{API_KEY_ENV, SERVICE_DOMAIN_ENV};
