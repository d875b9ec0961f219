//! Home page extractor

use crate::request::{CrawlTarget, PageTag};
use crate::url::to_absolute;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static WORLDWIDE_ITEMS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"ul[data-slide-pane="Hotels worldwide"] .sw-home-footer-links__link"#)
        .expect("valid selector")
});

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid selector"));

/// Scans the home page's worldwide region links
///
/// Only the worldwide pane is scanned: the European region is reachable via
/// the static country-list seed, so scanning it here would duplicate
/// coverage. A link whose href contains "/d-" points straight at a city
/// listing; everything else is a country list. Items without an anchor href
/// are skipped.
pub fn extract_home_page(doc: &Html, origin: &str) -> Vec<CrawlTarget> {
    let mut targets = Vec::new();

    for item in doc.select(&WORLDWIDE_ITEMS) {
        let href = match item
            .select(&ANCHOR)
            .next()
            .and_then(|a| a.value().attr("href"))
        {
            Some(href) => href,
            None => continue,
        };

        let tag = if href.contains("/d-") {
            PageTag::City
        } else {
            PageTag::CountryList
        };

        targets.push(CrawlTarget::new(to_absolute(origin, href), tag));
    }

    targets
}
