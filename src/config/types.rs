use crate::url::{DEFAULT_EUROPE_LIST_URL, DEFAULT_HOME_URL, DEFAULT_ORIGIN};
use serde::Deserialize;

/// Main configuration structure for hrs-harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    /// Optional proxy for all page fetches
    #[serde(rename = "proxy-url", default)]
    pub proxy_url: Option<String>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of queue insertions allowed in flight per batch
    #[serde(rename = "batch-size", default = "default_batch_size")]
    pub batch_size: usize,

    /// Ceiling on simultaneously handled pages
    #[serde(rename = "max-concurrent-pages", default = "default_max_concurrent")]
    pub max_concurrent_pages: usize,

    /// Retry budget for a single page fetch
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between retries of the same page (milliseconds)
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_batch_size() -> usize {
    10
}

fn default_max_concurrent() -> usize {
    40
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    5000
}

/// Site entry points
///
/// Defaults target the production site; tests point these at a mock server.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Origin prefixed onto site-relative hrefs (no trailing slash)
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Seed URL tagged as the home page
    #[serde(rename = "home-url", default = "default_home_url")]
    pub home_url: String,

    /// Static country-list seed URL covering the European region
    #[serde(rename = "europe-list-url", default = "default_europe_list_url")]
    pub europe_list_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            home_url: default_home_url(),
            europe_list_url: default_europe_list_url(),
        }
    }
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

fn default_home_url() -> String {
    DEFAULT_HOME_URL.to_string()
}

fn default_europe_list_url() -> String {
    DEFAULT_EUROPE_LIST_URL.to_string()
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite request-queue database
    #[serde(rename = "queue-path")]
    pub queue_path: String,

    /// Path to the JSON-lines dataset file
    #[serde(rename = "dataset-path")]
    pub dataset_path: String,
}
