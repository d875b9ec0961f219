//! Country page extractor

use crate::request::{CrawlTarget, PageTag};
use crate::url::to_absolute;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static TOP_LOCATION_LINKS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".sw-hotel-list-topLocation__title__link").expect("valid selector")
});

static PAGINATION_LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".sw-hotel-list-pagination ul a").expect("valid selector"));

/// The two independent link sets found on a country page
///
/// Top locations are city listings; pagination links re-feed the same
/// country listing so subsequent pages are walked. They are enqueued as two
/// separate batched passes, top locations first.
pub struct CountryPage {
    pub top_locations: Vec<CrawlTarget>,
    pub pagination: Vec<CrawlTarget>,
}

/// Scans a country page's top-location and pagination links
pub fn extract_country_page(doc: &Html, origin: &str) -> CountryPage {
    let mut top_locations = Vec::new();
    for link in doc.select(&TOP_LOCATION_LINKS) {
        if let Some(href) = link.value().attr("href") {
            top_locations.push(CrawlTarget::new(to_absolute(origin, href), PageTag::City));
        }
    }

    let mut pagination = Vec::new();
    for link in doc.select(&PAGINATION_LINKS) {
        if let Some(href) = link.value().attr("href") {
            pagination.push(CrawlTarget::new(to_absolute(origin, href), PageTag::Country));
        }
    }

    CountryPage {
        top_locations,
        pagination,
    }
}
