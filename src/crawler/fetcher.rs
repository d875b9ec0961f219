//! HTTP fetcher with a per-request retry budget
//!
//! Builds the shared HTTP client (user agent, timeouts, optional proxy) and
//! fetches pages. Transient failures (HTTP 5xx, 429, timeouts, connection
//! errors) are retried with a fixed delay until the budget runs out; other
//! HTTP errors fail immediately. A request that exhausts its budget is
//! terminal for that request only and is handed to the failure reporter.

use crate::config::Config;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Result of fetching one page
#[derive(Debug)]
pub enum FetchOutcome {
    /// Page body retrieved
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Retry budget exhausted (or non-retryable error)
    Exhausted {
        /// Description of the last error
        error: String,
        /// Number of attempts made
        attempts: u32,
    },
}

/// Builds the HTTP client shared by all page fetches
///
/// User agent format: `CrawlerName/Version (+ContactURL; ContactEmail)`.
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.user_agent.crawler_name,
        config.user_agent.crawler_version,
        config.user_agent.contact_url,
        config.user_agent.contact_email
    );

    let mut builder = Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true);

    if let Some(proxy_url) = &config.proxy_url {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
    }

    builder.build()
}

/// Fetches a URL, retrying transient failures up to `max_retries` times
///
/// Total attempts = 1 + max_retries. Retryable: HTTP 5xx, HTTP 429,
/// timeouts, connection errors. Everything else (e.g. HTTP 404) fails on
/// the first attempt.
pub async fn fetch_page(
    client: &Client,
    url: &str,
    max_retries: u32,
    retry_delay: Duration,
) -> FetchOutcome {
    let max_attempts = max_retries + 1;
    let mut attempts = 0;
    let mut last_error;

    loop {
        attempts += 1;

        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                let final_url = response.url().to_string();

                if status.is_success() {
                    match response.text().await {
                        Ok(body) => {
                            return FetchOutcome::Success {
                                final_url,
                                status_code: status.as_u16(),
                                body,
                            }
                        }
                        Err(e) => {
                            last_error = format!("Failed to read body: {}", e);
                        }
                    }
                } else if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                    last_error = format!("HTTP {}", status.as_u16());
                } else {
                    // Client errors do not get better with retries
                    return FetchOutcome::Exhausted {
                        error: format!("HTTP {}", status.as_u16()),
                        attempts,
                    };
                }
            }
            Err(e) => {
                if e.is_timeout() {
                    last_error = "Request timeout".to_string();
                } else if e.is_connect() {
                    last_error = format!("Connection error: {}", e);
                } else {
                    return FetchOutcome::Exhausted {
                        error: e.to_string(),
                        attempts,
                    };
                }
            }
        }

        if attempts >= max_attempts {
            return FetchOutcome::Exhausted {
                error: last_error,
                attempts,
            };
        }

        tracing::debug!(
            "Retrying {} after error ({}/{}): {}",
            url,
            attempts,
            max_attempts,
            last_error
        );
        tokio::time::sleep(retry_delay).await;
    }
}
