//! Policy-Crawler main entry point
//!
//! This is the command-line interface for the Policy-Crawler health-policy
//! harvester.

use clap::Parser;
use policy_crawler::config::{load_config, load_site_list, Config, DEFAULT_SINGLE_SITE_URL};
use policy_crawler::crawler::{apply_single_site_defaults, run_crawl, run_single_site};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Policy-Crawler: a polite harvester of health-policy notices
///
/// Policy-Crawler visits each listing page named in the site list, follows
/// links whose titles look like policy documents, and saves title, date,
/// issuing agency and full text as JSON, CSV and plain text.
#[derive(Parser, Debug)]
#[command(name = "policy-crawler")]
#[command(version)]
#[command(about = "A polite harvester of health-policy notices", long_about = None)]
struct Cli {
    /// Site list: one listing page URL per line, `#` for comments
    #[arg(long, value_name = "PATH", default_value = "websites.txt")]
    sites: PathBuf,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory for checkpoints and exports (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Crawl a single listing page with fixed output file names
    #[arg(
        long,
        value_name = "URL",
        num_args = 0..=1,
        default_missing_value = DEFAULT_SINGLE_SITE_URL
    )]
    single: Option<String>,

    /// Validate configuration and list the sites without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    if let Some(dir) = cli.output_dir {
        config.output.directory = dir;
    }

    if let Some(site) = cli.single {
        apply_single_site_defaults(&mut config);
        if cli.dry_run {
            print_dry_run(&config, std::slice::from_ref(&site));
            return Ok(());
        }
        return handle_crawl(config, vec![site], true).await;
    }

    // A missing or empty site list ends the run before any request is made
    let sites = match load_site_list(&cli.sites) {
        Ok(sites) => sites,
        Err(e) => {
            tracing::error!("{}; nothing to crawl", e);
            return Ok(());
        }
    };

    if cli.dry_run {
        print_dry_run(&config, &sites);
        return Ok(());
    }

    handle_crawl(config, sites, false).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("policy_crawler=info,warn"),
            1 => EnvFilter::new("policy_crawler=debug,info"),
            2 => EnvFilter::new("policy_crawler=trace,debug"),
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

/// Handles the --dry-run mode: shows what would be crawled
fn print_dry_run(config: &Config, sites: &[String]) {
    println!("=== Policy-Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max items: {}", config.crawler.max_items);
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!(
        "  Timeouts: listing {}s, document {}s",
        config.crawler.listing_timeout_secs, config.crawler.document_timeout_secs
    );
    match config.crawler.max_links_per_site {
        Some(limit) => println!("  Max links per site: {}", limit),
        None => println!("  Max links per site: unlimited"),
    }
    println!("  Keywords: {}", config.crawler.keywords.join(", "));

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Mode: {:?}", config.output.mode);

    println!("\nSites ({}):", sites.len());
    for site in sites {
        println!("  - {}", site);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: Config,
    sites: Vec<String>,
    single: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = if single {
        tracing::info!("Single-site crawl of {}", sites.join(", "));
        match sites.into_iter().next() {
            Some(site) => run_single_site(config, site).await,
            None => return Ok(()),
        }
    } else {
        tracing::info!("Crawling {} sites", sites.len());
        run_crawl(config, sites).await
    };

    match result {
        Ok(stats) => {
            tracing::info!(
                "Crawl completed successfully with {} records",
                stats.records
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
