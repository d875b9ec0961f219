//! Country-list page extractor

use crate::request::{CrawlTarget, PageTag};
use crate::url::to_absolute;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static LIST_ITEMS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".sw-multi-column-list .sw-multi-column-list__item").expect("valid selector")
});

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid selector"));

/// Scans the multi-column country list; every link becomes a country target
pub fn extract_country_list(doc: &Html, origin: &str) -> Vec<CrawlTarget> {
    let mut targets = Vec::new();

    for item in doc.select(&LIST_ITEMS) {
        let href = match item
            .select(&ANCHOR)
            .next()
            .and_then(|a| a.value().attr("href"))
        {
            Some(href) => href,
            None => continue,
        };

        targets.push(CrawlTarget::new(to_absolute(origin, href), PageTag::Country));
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::DEFAULT_ORIGIN;

    #[test]
    fn test_every_link_becomes_a_country_target() {
        let html = r#"<html><body>
            <div class="sw-multi-column-list">
                <div class="sw-multi-column-list__item"><a href="/en/hotel/germany">Germany</a></div>
                <div class="sw-multi-column-list__item"><a href="/en/hotel/france">France</a></div>
                <div class="sw-multi-column-list__item"><a href="/en/hotel/italy">Italy</a></div>
            </div>
        </body></html>"#;

        let targets = extract_country_list(&Html::parse_document(html), DEFAULT_ORIGIN);

        assert_eq!(targets.len(), 3);
        assert!(targets.iter().all(|t| t.tag == PageTag::Country));
        assert_eq!(targets[0].url, "https://www.hrs.com/en/hotel/germany");
        assert_eq!(targets[2].url, "https://www.hrs.com/en/hotel/italy");
    }

    #[test]
    fn test_item_without_anchor_is_skipped() {
        let html = r#"<html><body>
            <div class="sw-multi-column-list">
                <div class="sw-multi-column-list__item"><span>header</span></div>
                <div class="sw-multi-column-list__item"><a href="/en/hotel/spain">Spain</a></div>
            </div>
        </body></html>"#;

        let targets = extract_country_list(&Html::parse_document(html), DEFAULT_ORIGIN);
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn test_empty_page() {
        let targets =
            extract_country_list(&Html::parse_document("<html><body></body></html>"), DEFAULT_ORIGIN);
        assert!(targets.is_empty());
    }
}
