//! hrs-harvest main entry point
//!
//! Command-line interface for the hotel-listing crawler.

use clap::Parser;
use hrs_harvest::config::load_config_with_hash;
use hrs_harvest::crawler::crawl;
use hrs_harvest::queue::SqliteQueue;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// hrs-harvest: a single-site hotel-listing crawler
///
/// Walks the booking site's navigation hierarchy (home page, region lists,
/// countries, cities, hotel listings) and writes structured hotel records
/// to a JSON-lines dataset, driven by a persistent work queue.
#[derive(Parser, Debug)]
#[command(name = "hrs-harvest")]
#[command(version = "0.1.0")]
#[command(about = "A single-site hotel-listing crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Resume an interrupted crawl (default behavior)
    #[arg(long, conflicts_with = "fresh")]
    resume: bool,

    /// Start a fresh crawl, clearing the existing queue
    #[arg(long, conflicts_with = "resume")]
    fresh: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show queue statistics from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config, cli.fresh).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hrs_harvest=info,warn"),
            1 => EnvFilter::new("hrs_harvest=debug,info"),
            2 => EnvFilter::new("hrs_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &hrs_harvest::config::Config) {
    println!("=== hrs-harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Batch size: {}", config.crawler.batch_size);
    println!(
        "  Max concurrent pages: {}",
        config.crawler.max_concurrent_pages
    );
    println!("  Max retries: {}", config.crawler.max_retries);
    println!("  Retry delay: {}ms", config.crawler.retry_delay_ms);

    println!("\nSite:");
    println!("  Origin: {}", config.site.origin);
    println!("  Home seed: {}", config.site.home_url);
    println!("  Europe list seed: {}", config.site.europe_list_url);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Queue: {}", config.output.queue_path);
    println!("  Dataset: {}", config.output.dataset_path);

    if let Some(proxy) = &config.proxy_url {
        println!("\nProxy: {}", proxy);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would seed 2 entry URLs");
}

/// Handles the --stats mode: shows queue statistics from the database
fn handle_stats(config: &hrs_harvest::config::Config) -> anyhow::Result<()> {
    println!("Queue database: {}\n", config.output.queue_path);

    let queue = SqliteQueue::new(Path::new(&config.output.queue_path))?;
    let counts = queue.state_counts()?;

    if counts.is_empty() {
        println!("Queue is empty");
        return Ok(());
    }

    let mut total = 0;
    for (state, count) in &counts {
        println!("  {:<10} {}", state, count);
        total += count;
    }
    println!("  {:<10} {}", "total", total);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: hrs_harvest::config::Config, fresh: bool) -> anyhow::Result<()> {
    if fresh {
        tracing::info!("Starting fresh crawl (clearing previous queue)");
    } else {
        tracing::info!("Starting crawl (will resume if interrupted run exists)");
    }

    match crawl(config, fresh).await {
        Ok(()) => {
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
