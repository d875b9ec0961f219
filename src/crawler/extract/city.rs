//! City page extractor
//!
//! The city listing page carries everything the final hotel record needs,
//! spread over three embedded sources per hotel anchor: a click-tracking
//! JSON blob on the anchor, a hotel-data JSON blob on a child element, and
//! a star rating encoded in a CSS class name. The record is built here, at
//! listing time; the later detail fetch is a pass-through.

use crate::crawler::extract::fields;
use crate::request::{CrawlTarget, HotelRecord, PageTag};
use crate::url::to_absolute;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::Value;

static HOTEL_ANCHORS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.sw-hotel-list > a.sw-hotel-list__link").expect("valid selector"));

static HOTEL_ELEMENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.sw-hotel-list__element").expect("valid selector"));

static RATING_ICON: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div[data-stars] div.sw-hotel__rating").expect("valid selector"));

static PAGE_LIST_ITEMS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#pagesListAll li").expect("valid selector"));

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid selector"));

/// Extraction result for one city page
///
/// Hotels are enqueued first, pagination second, as two batched passes.
/// Pagination is re-enqueued on every page; the queue's URL dedup keeps the
/// already-visited pages from being fetched again.
pub struct CityPage {
    pub hotels: Vec<CrawlTarget>,
    pub pagination: Vec<CrawlTarget>,
}

/// Scans a city page's hotel anchors and pagination links
pub fn extract_city_page(doc: &Html, origin: &str) -> CityPage {
    let mut hotels = Vec::new();
    for anchor in doc.select(&HOTEL_ANCHORS) {
        let href = match anchor.value().attr("href") {
            Some(href) => href,
            None => continue,
        };

        let gtm = parse_json_attr(anchor.value().attr("data-gtm-click"));
        let item = parse_json_attr(
            anchor
                .select(&HOTEL_ELEMENT)
                .next()
                .and_then(|el| el.value().attr("data-hotel-item")),
        );
        let star_class = anchor
            .select(&RATING_ICON)
            .next()
            .and_then(|el| el.value().attr("class"))
            .unwrap_or("");

        let record = build_record(&gtm, &item, star_class, to_absolute(origin, href));
        hotels.push(CrawlTarget::new(
            record.url.clone(),
            PageTag::HotelDetail(Box::new(record)),
        ));
    }

    let mut pagination = Vec::new();
    for li in doc.select(&PAGE_LIST_ITEMS) {
        // The ellipsis placeholder is not a page link
        if li.value().classes().any(|c| c == "is-ellipsis") {
            continue;
        }

        // An entry with no href (e.g. the current page) is a completed no-op
        let href = match li
            .select(&ANCHOR)
            .next()
            .and_then(|a| a.value().attr("href"))
        {
            Some(href) => href,
            None => continue,
        };

        pagination.push(CrawlTarget::new(to_absolute(origin, href), PageTag::City));
    }

    CityPage { hotels, pagination }
}

/// Parses a JSON data attribute, falling back to an empty object
fn parse_json_attr(raw: Option<&str>) -> Value {
    raw.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_else(|| Value::Object(Default::default()))
}

/// Builds one hotel record from the anchor's three embedded data sources
///
/// Every derivation is independently optional: a source field that is
/// missing or fails its pattern leaves the record field absent.
fn build_record(gtm: &Value, item: &Value, star_class: &str, url: String) -> HotelRecord {
    let address = item.get("address").and_then(Value::as_str);
    let name = item.get("name").and_then(Value::as_str).map(str::to_string);

    HotelRecord {
        hrs_id: item.get("id").cloned().filter(|v| !v.is_null()),
        clean_name: gtm
            .get("elementClickName")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| name.clone()),
        name,
        address_postal_code: address.and_then(fields::postal_code),
        address_city: address
            .map(|a| fields::city_after_postal(a).unwrap_or_else(|| a.to_string())),
        city_distance: str_field(item, "cityDistance").and_then(fields::distance_km),
        airport_distance: str_field(item, "airportDistance").and_then(fields::distance_km),
        train_station_distance: str_field(item, "trainStationDistance")
            .and_then(fields::distance_km),
        lat: item.get("geo").and_then(|g| g.get("lat")).and_then(num_field),
        lon: item.get("geo").and_then(|g| g.get("lng")).and_then(num_field),
        review_rating: item.get("ratingAverage").and_then(num_field),
        review_count: str_field(item, "ratingCount").and_then(fields::leading_int),
        star_rating: fields::star_rating(star_class),
        price_tag: fields::price_tag(
            item.get("priceInteger").and_then(display_field),
            item.get("priceCurrency").and_then(display_field),
        ),
        thumb_url: str_field(item, "thumb").map(str::to_string),
        url,
    }
}

fn str_field<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key).and_then(Value::as_str)
}

/// Numeric field that upstream emits either as a JSON number or a string
fn num_field(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => fields::leading_float(s),
        _ => None,
    }
}

/// Field rendered verbatim whether upstream sends a string or a number
fn display_field(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::DEFAULT_ORIGIN;

    fn full_listing_html() -> &'static str {
        r##"<html><body>
        <div class="sw-hotel-list">
            <a class="sw-hotel-list__link" href="/en/hotel/hotel-berlin-h-100"
               data-gtm-click='{"elementClickName":"Hotel Berlin Mitte"}'>
                <div class="sw-hotel-list__element"
                     data-hotel-item='{"id":100,"name":"Hotel Berlin Mitte GmbH","address":"Hauptstr. 7, 10115&nbsp;Berlin","cityDistance":"City centre: 1.2 km","airportDistance":"Airport: 18.4 km","trainStationDistance":"Station: 0.6 km","geo":{"lat":52.53,"lng":13.38},"ratingAverage":"8.3","ratingCount":"412 reviews","priceInteger":89,"priceCurrency":"EUR","thumb":"https://img.example/100.jpg"}'>
                    <div data-stars="true"><div class="sw-hotel__rating sw-icon-stars-4.5"></div></div>
                </div>
            </a>
            <a class="sw-hotel-list__link" href="/en/hotel/pension-h-200">
                <div class="sw-hotel-list__element" data-hotel-item='{"name":"Pension Alt"}'></div>
            </a>
        </div>
        <ul id="pagesListAll">
            <li><a>1</a></li>
            <li><a href="/en/hotel/berlin/d-1?page=2">2</a></li>
            <li class="is-ellipsis"><a href="/never">…</a></li>
            <li><a href="/en/hotel/berlin/d-1?page=9">9</a></li>
        </ul>
        </body></html>"##
    }

    #[test]
    fn test_full_record_derivation() {
        let page = extract_city_page(&Html::parse_document(full_listing_html()), DEFAULT_ORIGIN);
        assert_eq!(page.hotels.len(), 2);

        let record = match &page.hotels[0].tag {
            PageTag::HotelDetail(record) => record,
            other => panic!("expected hotel detail, got {:?}", other),
        };

        assert_eq!(record.hrs_id, Some(Value::from(100)));
        assert_eq!(record.name.as_deref(), Some("Hotel Berlin Mitte GmbH"));
        assert_eq!(record.clean_name.as_deref(), Some("Hotel Berlin Mitte"));
        assert_eq!(record.address_postal_code.as_deref(), Some("10115"));
        assert_eq!(record.address_city.as_deref(), Some("Berlin"));
        assert_eq!(record.city_distance, Some(1.2));
        assert_eq!(record.airport_distance, Some(18.4));
        assert_eq!(record.train_station_distance, Some(0.6));
        assert_eq!(record.lat, Some(52.53));
        assert_eq!(record.lon, Some(13.38));
        assert_eq!(record.review_rating, Some(8.3));
        assert_eq!(record.review_count, Some(412));
        assert_eq!(record.star_rating.as_deref(), Some("4.5"));
        assert_eq!(record.price_tag, "89 EUR");
        assert_eq!(record.thumb_url.as_deref(), Some("https://img.example/100.jpg"));
        assert_eq!(record.url, "https://www.hrs.com/en/hotel/hotel-berlin-h-100");

        // The detail target's URL is the record's own URL
        assert_eq!(page.hotels[0].url, record.url);
    }

    #[test]
    fn test_sparse_record_leaves_fields_absent() {
        let page = extract_city_page(&Html::parse_document(full_listing_html()), DEFAULT_ORIGIN);
        let record = match &page.hotels[1].tag {
            PageTag::HotelDetail(record) => record,
            other => panic!("expected hotel detail, got {:?}", other),
        };

        assert_eq!(record.hrs_id, None);
        assert_eq!(record.name.as_deref(), Some("Pension Alt"));
        // No click-tracking blob: clean name falls back to the name
        assert_eq!(record.clean_name.as_deref(), Some("Pension Alt"));
        assert_eq!(record.address_postal_code, None);
        assert_eq!(record.address_city, None);
        assert_eq!(record.city_distance, None);
        assert_eq!(record.review_rating, None);
        assert_eq!(record.star_rating, None);
        assert_eq!(record.price_tag, "undefined undefined");
        assert_eq!(record.url, "https://www.hrs.com/en/hotel/pension-h-200");
    }

    #[test]
    fn test_address_without_postal_pattern_falls_back_to_full_address() {
        let html = r##"<html><body><div class="sw-hotel-list">
            <a class="sw-hotel-list__link" href="/h-1">
                <div class="sw-hotel-list__element" data-hotel-item='{"address":"Marktplatz 3"}'></div>
            </a>
        </div></body></html>"##;

        let page = extract_city_page(&Html::parse_document(html), DEFAULT_ORIGIN);
        let record = match &page.hotels[0].tag {
            PageTag::HotelDetail(record) => record,
            other => panic!("expected hotel detail, got {:?}", other),
        };

        assert_eq!(record.address_postal_code, None);
        assert_eq!(record.address_city.as_deref(), Some("Marktplatz 3"));
    }

    #[test]
    fn test_malformed_json_blob_is_treated_as_empty() {
        let html = r##"<html><body><div class="sw-hotel-list">
            <a class="sw-hotel-list__link" href="/h-1" data-gtm-click='not json'>
                <div class="sw-hotel-list__element" data-hotel-item='also not json'></div>
            </a>
        </div></body></html>"##;

        let page = extract_city_page(&Html::parse_document(html), DEFAULT_ORIGIN);
        assert_eq!(page.hotels.len(), 1);

        let record = match &page.hotels[0].tag {
            PageTag::HotelDetail(record) => record,
            other => panic!("expected hotel detail, got {:?}", other),
        };
        assert_eq!(record.name, None);
        assert_eq!(record.price_tag, "undefined undefined");
        assert_eq!(record.url, "https://www.hrs.com/h-1");
    }

    #[test]
    fn test_pagination_skips_ellipsis_and_hrefless_entries() {
        let page = extract_city_page(&Html::parse_document(full_listing_html()), DEFAULT_ORIGIN);

        assert_eq!(page.pagination.len(), 2);
        assert!(page.pagination.iter().all(|t| t.tag == PageTag::City));
        assert_eq!(
            page.pagination[0].url,
            "https://www.hrs.com/en/hotel/berlin/d-1?page=2"
        );
        assert_eq!(
            page.pagination[1].url,
            "https://www.hrs.com/en/hotel/berlin/d-1?page=9"
        );
    }

    #[test]
    fn test_empty_city_page_yields_nothing() {
        let page =
            extract_city_page(&Html::parse_document("<html><body></body></html>"), DEFAULT_ORIGIN);
        assert!(page.hotels.is_empty());
        assert!(page.pagination.is_empty());
    }

    #[test]
    fn test_string_price_and_numeric_rating() {
        let html = r##"<html><body><div class="sw-hotel-list">
            <a class="sw-hotel-list__link" href="/h-1">
                <div class="sw-hotel-list__element"
                     data-hotel-item='{"priceInteger":"120","priceCurrency":"CHF","ratingAverage":7.1}'></div>
            </a>
        </div></body></html>"##;

        let page = extract_city_page(&Html::parse_document(html), DEFAULT_ORIGIN);
        let record = match &page.hotels[0].tag {
            PageTag::HotelDetail(record) => record,
            other => panic!("expected hotel detail, got {:?}", other),
        };

        assert_eq!(record.price_tag, "120 CHF");
        assert_eq!(record.review_rating, Some(7.1));
    }
}
