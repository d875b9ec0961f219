//! hrs-harvest: a single-site hotel-listing crawler
//!
//! This crate walks a hotel-booking website's navigation hierarchy
//! (home page → region lists → countries → cities → hotel listings)
//! and extracts structured hotel records into a JSON-lines dataset,
//! driven by a persistent, URL-deduplicating work queue.

pub mod config;
pub mod crawler;
pub mod queue;
pub mod request;
pub mod sink;
pub mod url;

use thiserror::Error;

/// Main error type for hrs-harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Queue error: {0}")]
    Queue(#[from] queue::QueueError),

    #[error("Sink error: {0}")]
    Sink(#[from] sink::SinkError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for hrs-harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crate::url::{to_absolute, DEFAULT_ORIGIN};
pub use request::{CrawlTarget, DebugRecord, HotelRecord, PageTag};
