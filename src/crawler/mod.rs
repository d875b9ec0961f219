//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a per-request retry budget
//! - Page-type extractors over listing DOMs
//! - Batched submission of discovered targets
//! - Terminal failure reporting
//! - Overall crawl coordination

mod batch;
mod coordinator;
pub mod extract;
mod fetcher;
mod reporter;

pub use batch::{resolve_in_batches, DEFAULT_BATCH_SIZE};
pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use reporter::FailureReporter;

use crate::config::Config;
use crate::HarvestError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open the persistent request queue and the dataset sink
/// 2. Apply the fresh/resume policy
/// 3. Seed the two entry points
/// 4. Drain the queue: fetch, extract, enqueue, emit
pub async fn crawl(config: Config, fresh: bool) -> Result<(), HarvestError> {
    run_crawl(config, fresh).await
}
