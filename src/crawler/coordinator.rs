//! Crawl coordinator - main crawl orchestration logic
//!
//! Seeds the two entry points, then drains the queue: reserve a batch of
//! pending requests, handle them concurrently (fetch → classify → extract →
//! enqueue/emit), repeat until the queue is empty. Each page's handling is
//! independent and stateless beyond its own request metadata; the queue is
//! the only shared mutable resource.

use crate::config::Config;
use crate::crawler::batch::resolve_in_batches;
use crate::crawler::extract::{
    extract_city_page, extract_country_list, extract_country_page, extract_home_page,
};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::crawler::reporter::FailureReporter;
use crate::queue::{EnqueueOutcome, QueuedRequest, RequestQueue, SqliteQueue};
use crate::request::{CrawlTarget, HotelRecord, PageTag};
use crate::sink::{DatasetEntry, JsonlSink, Sink};
use crate::HarvestError;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use scraper::Html;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// What a page's extractor produced
///
/// Navigation pages yield one or more target sets, each enqueued as its own
/// batched pass; the detail page yields its already-complete record.
enum PageOutput {
    Targets(Vec<Vec<CrawlTarget>>),
    Record(Box<HotelRecord>),
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    queue: Arc<dyn RequestQueue>,
    sink: Arc<dyn Sink>,
    reporter: FailureReporter,
    client: Client,
}

impl Coordinator {
    /// Creates a new coordinator over an already-opened queue and sink
    pub fn new(
        config: Config,
        queue: Arc<dyn RequestQueue>,
        sink: Arc<dyn Sink>,
    ) -> Result<Self, HarvestError> {
        let client = build_http_client(&config)?;
        let reporter = FailureReporter::new(sink.clone());

        Ok(Self {
            config: Arc::new(config),
            queue,
            sink,
            reporter,
            client,
        })
    }

    /// Seeds the two entry points: the home page and the static Europe list
    ///
    /// Enqueueing dedups on URL, so seeding a resumed crawl is harmless.
    pub async fn seed(&self) -> Result<(), HarvestError> {
        self.queue
            .enqueue(CrawlTarget::new(
                self.config.site.home_url.clone(),
                PageTag::HomePage,
            ))
            .await?;
        self.queue
            .enqueue(CrawlTarget::new(
                self.config.site.europe_list_url.clone(),
                PageTag::CountryList,
            ))
            .await?;
        Ok(())
    }

    /// Runs the crawl to completion
    ///
    /// Terminates when the queue has no pending requests and every reserved
    /// request has settled.
    pub async fn run(&self) -> Result<(), HarvestError> {
        let width = self.config.crawler.max_concurrent_pages;
        let mut pages_handled: u64 = 0;
        let start_time = std::time::Instant::now();

        loop {
            let batch = self.queue.reserve_batch(width).await?;
            if batch.is_empty() {
                tracing::info!("Queue is empty, crawl complete");
                break;
            }

            let batch_len = batch.len() as u64;
            stream::iter(batch)
                .map(|request| self.handle_request(request))
                .buffer_unordered(width)
                .collect::<Vec<_>>()
                .await;

            pages_handled += batch_len;
            let pending = self.queue.pending_count().await?;
            let rate = pages_handled as f64 / start_time.elapsed().as_secs_f64();
            tracing::info!(
                "Progress: {} pages handled, {} pending, {:.2} pages/sec",
                pages_handled,
                pending,
                rate
            );
        }

        tracing::info!(
            "Crawl completed: {} pages handled in {:?}",
            pages_handled,
            start_time.elapsed()
        );

        Ok(())
    }

    /// Handles one reserved request, containing any error to this request
    async fn handle_request(&self, request: QueuedRequest) {
        let id = request.id;
        let url = request.url.clone();
        if let Err(e) = self.process_request(request).await {
            tracing::error!("Error processing {}: {}", url, e);
            if let Err(mark_err) = self.queue.mark_failed(id, 0, &e.to_string()).await {
                tracing::error!("Failed to mark {} as failed: {}", url, mark_err);
            }
        }
    }

    /// Fetches a request's page and routes it through its extractor
    async fn process_request(&self, request: QueuedRequest) -> Result<(), HarvestError> {
        let outcome = fetch_page(
            &self.client,
            &request.url,
            self.config.crawler.max_retries,
            Duration::from_millis(self.config.crawler.retry_delay_ms),
        )
        .await;

        match outcome {
            FetchOutcome::Success { body, .. } => {
                self.dispatch(&request, &body).await?;
                self.queue.mark_done(request.id).await?;
            }
            FetchOutcome::Exhausted { error, attempts } => {
                self.reporter.report(&request.url, attempts, &error)?;
                self.queue.mark_failed(request.id, attempts, &error).await?;
            }
        }

        Ok(())
    }

    /// Classifies the request and applies the matching extractor
    ///
    /// A request whose tag no longer decodes is fetched but produces no
    /// enqueues and no sink writes.
    async fn dispatch(&self, request: &QueuedRequest, body: &str) -> Result<(), HarvestError> {
        let tag = match &request.tag {
            Some(tag) => tag,
            None => {
                tracing::debug!("No extractor for {}, skipping", request.url);
                return Ok(());
            }
        };

        match tag {
            PageTag::HomePage => tracing::info!("Processing home page - {}", request.url),
            PageTag::CountryList => {
                tracing::info!("Processing country list page - {}", request.url)
            }
            PageTag::Country => tracing::info!("Processing country page - {}", request.url),
            PageTag::City => tracing::info!("Processing city page - {}", request.url),
            PageTag::HotelDetail(_) => {
                tracing::debug!("Forwarding hotel record - {}", request.url)
            }
        }

        match extract_output(tag, body, &self.config.site.origin) {
            PageOutput::Targets(sets) => {
                for set in sets {
                    self.enqueue_targets(set).await?;
                }
            }
            PageOutput::Record(record) => {
                self.sink.emit(&DatasetEntry::Hotel(*record))?;
            }
        }

        Ok(())
    }

    /// Submits discovered targets through the batched enqueuer
    async fn enqueue_targets(&self, targets: Vec<CrawlTarget>) -> Result<(), HarvestError> {
        if targets.is_empty() {
            return Ok(());
        }

        let ops: Vec<_> = targets
            .into_iter()
            .map(|target| {
                let queue = self.queue.clone();
                async move { queue.enqueue(target).await }
            })
            .collect();

        let outcomes = resolve_in_batches(ops, self.config.crawler.batch_size).await?;
        let inserted = outcomes
            .iter()
            .filter(|o| **o == EnqueueOutcome::Inserted)
            .count();
        tracing::debug!(
            "Enqueued {} new targets ({} duplicates)",
            inserted,
            outcomes.len() - inserted
        );

        Ok(())
    }
}

/// Runs a page's extractor synchronously
///
/// The parsed document never crosses an await point; extraction finishes
/// before any enqueue is submitted.
fn extract_output(tag: &PageTag, body: &str, origin: &str) -> PageOutput {
    match tag {
        PageTag::HomePage => {
            let doc = Html::parse_document(body);
            PageOutput::Targets(vec![extract_home_page(&doc, origin)])
        }
        PageTag::CountryList => {
            let doc = Html::parse_document(body);
            PageOutput::Targets(vec![extract_country_list(&doc, origin)])
        }
        PageTag::Country => {
            let doc = Html::parse_document(body);
            let page = extract_country_page(&doc, origin);
            PageOutput::Targets(vec![page.top_locations, page.pagination])
        }
        PageTag::City => {
            let doc = Html::parse_document(body);
            let page = extract_city_page(&doc, origin);
            PageOutput::Targets(vec![page.hotels, page.pagination])
        }
        PageTag::HotelDetail(record) => PageOutput::Record(record.clone()),
    }
}

/// Runs the main crawl operation
///
/// Opens the queue and sink from the configured paths, applies the
/// fresh/resume policy, seeds the entry points, and drains the queue.
pub async fn run_crawl(config: Config, fresh: bool) -> Result<(), HarvestError> {
    let queue: Arc<dyn RequestQueue> =
        Arc::new(SqliteQueue::new(Path::new(&config.output.queue_path))?);

    if fresh {
        queue.clear().await?;
    } else {
        let reset = queue.reset_in_flight().await?;
        if reset > 0 {
            tracing::info!("Returned {} interrupted requests to the queue", reset);
        }
    }

    let sink: Arc<dyn Sink> = Arc::new(JsonlSink::new(Path::new(&config.output.dataset_path))?);

    let coordinator = Coordinator::new(config, queue, sink)?;
    coordinator.seed().await?;
    coordinator.run().await
}
