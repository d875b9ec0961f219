//! Persistent request queue
//!
//! The queue is the only shared mutable resource in the crawl: every
//! discovered target is inserted through it, deduplicated on the URL
//! string, and handed back out exactly once. Components receive the queue
//! as an injected trait object, never through globals.

mod schema;
mod sqlite;

pub use sqlite::SqliteQueue;

use crate::request::{CrawlTarget, PageTag};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during queue operations
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Payload serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Request not found: {0}")]
    RequestNotFound(i64),
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Outcome of an enqueue call
///
/// A duplicate URL is a no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Inserted,
    Duplicate,
}

/// A request handed out for processing
///
/// `tag` is None when the persisted kind/payload no longer decodes; such a
/// request is still fetched, then dropped without effect.
#[derive(Debug, Clone)]
pub struct QueuedRequest {
    pub id: i64,
    pub url: String,
    pub tag: Option<PageTag>,
}

/// Trait for request-queue backends
///
/// Insertion is atomic and idempotent per URL. Requests move through
/// pending → in-flight → done/failed; `reserve_batch` performs the
/// pending → in-flight transition.
#[async_trait]
pub trait RequestQueue: Send + Sync {
    /// Inserts a target, deduplicating on its URL
    async fn enqueue(&self, target: CrawlTarget) -> QueueResult<EnqueueOutcome>;

    /// Reserves up to `limit` pending requests, oldest first, marking them
    /// in-flight
    async fn reserve_batch(&self, limit: usize) -> QueueResult<Vec<QueuedRequest>>;

    /// Marks a request as handled
    async fn mark_done(&self, id: i64) -> QueueResult<()>;

    /// Marks a request as terminally failed after `retry_count` attempts
    async fn mark_failed(&self, id: i64, retry_count: u32, error: &str) -> QueueResult<()>;

    /// Number of requests still waiting to be reserved
    async fn pending_count(&self) -> QueueResult<u64>;

    /// Returns in-flight requests to pending (crash recovery on resume)
    async fn reset_in_flight(&self) -> QueueResult<u64>;

    /// Removes every request (fresh runs)
    async fn clear(&self) -> QueueResult<()>;
}
