//! Page-type extractors
//!
//! One extractor per known page tag, each a pure function from a parsed
//! document to new crawl targets (navigation pages) or hotel records (city
//! listings). Targets are produced in document order; missing hrefs and
//! failed patterns are skipped, never errors.

mod city;
mod country;
mod country_list;
pub mod fields;
mod home;

pub use city::{extract_city_page, CityPage};
pub use country::{extract_country_page, CountryPage};
pub use country_list::extract_country_list;
pub use home::extract_home_page;
