//! Helper functions for building links to the site's archive pages

mod url;

pub use url::*;
