//! URL handling for the crawler
//!
//! The site emits a mix of site-relative and absolute hrefs; this module
//! turns them into the absolute form the work queue dedups on.

mod normalize;

pub use normalize::{to_absolute, DEFAULT_EUROPE_LIST_URL, DEFAULT_HOME_URL, DEFAULT_ORIGIN};
