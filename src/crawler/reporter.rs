//! Failure reporter for permanently-failed requests
//!
//! Invoked when a request has exhausted its retry budget. Records one
//! debug entry and moves on; never retries further and never aborts the
//! crawl.

use crate::request::DebugRecord;
use crate::sink::{DatasetEntry, Sink, SinkResult};
use chrono::Utc;
use std::sync::Arc;

/// Terminal handler for requests that failed too many times
pub struct FailureReporter {
    sink: Arc<dyn Sink>,
}

impl FailureReporter {
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self { sink }
    }

    /// Records a terminal failure in the dataset
    pub fn report(&self, url: &str, retry_count: u32, error: &str) -> SinkResult<()> {
        tracing::warn!("Request {} failed too many times", url);

        let record = DebugRecord {
            url: url.to_string(),
            retry_count,
            error_message: error.to_string(),
            failed_at: Utc::now().to_rfc3339(),
        };

        self.sink.emit(&DatasetEntry::Debug { debug: record })
    }
}
