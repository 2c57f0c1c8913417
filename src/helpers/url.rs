//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters escaped by ECMAScript `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Generate a URL with the root path, collapsing repeated slashes
///
/// # Examples
/// ```ignore
/// url_for(&config, "/archive/") // -> "/blog/archive/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let joined = format!("/{}/{}", config.root, path);

    let mut result = String::with_capacity(joined.len());
    for c in joined.chars() {
        if c == '/' && result.ends_with('/') {
            continue;
        }
        result.push(c);
    }
    result
}

/// Percent-encode a single URI component
pub fn encode_uri_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// Archive URL listing the posts of a category
///
/// Empty names and the uncategorized label map to the uncategorized archive.
pub fn category_url(config: &SiteConfig, uncategorized: &str, category: &str) -> String {
    let name = category.trim();
    if name.is_empty() || name.to_lowercase() == uncategorized.to_lowercase() {
        return url_for(config, "/archive/?uncategorized=true");
    }
    url_for(
        config,
        &format!("/archive/?category={}", encode_uri_component(name)),
    )
}

/// Archive URL listing the posts carrying a tag
pub fn tag_url(config: &SiteConfig, tag: &str) -> String {
    let name = tag.trim();
    if name.is_empty() {
        return url_for(config, "/archive/");
    }
    url_for(config, &format!("/archive/?tag={}", encode_uri_component(name)))
}
