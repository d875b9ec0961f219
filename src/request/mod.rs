//! Request model: crawl targets, page tags, and output records
//!
//! A crawl target is one pending unit of work: an absolute URL plus a page
//! tag that routes the fetched page to the matching extractor. Navigation
//! tags carry no payload; the hotel-detail tag carries the full record
//! harvested from the listing page.

mod record;
mod target;

pub use record::{DebugRecord, HotelRecord};
pub use target::{CrawlTarget, PageTag};
