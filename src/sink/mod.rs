//! Dataset sink
//!
//! The sink receives finished hotel records and terminal-failure debug
//! records. Delivery is at-least-once; the sink performs no dedup of its
//! own.

mod jsonl;

pub use jsonl::JsonlSink;

use crate::request::{DebugRecord, HotelRecord};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during sink operations
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// One entry of the output dataset
///
/// Debug records are wrapped under the reserved `#debug` key so consumers
/// can separate them from hotel records.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DatasetEntry {
    Hotel(HotelRecord),
    Debug {
        #[serde(rename = "#debug")]
        debug: DebugRecord,
    },
}

/// Trait for dataset sinks
pub trait Sink: Send + Sync {
    /// Appends one entry to the dataset
    fn emit(&self, entry: &DatasetEntry) -> SinkResult<()>;
}
