//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop, which walks the configured
//! listing pages strictly in order:
//! - Fetching each listing page and discovering policy links
//! - Fetching each candidate document and extracting its fields
//! - Enforcing the global record cap and the inter-request delay
//! - Checkpointing after every site and writing the final exports
//!
//! One request is in flight at any moment. Failures are isolated: a listing
//! failure skips the site, a document failure skips the item.

use crate::config::{Config, OutputMode};
use crate::crawler::extract::{extract_policy_content, extract_publication_date};
use crate::crawler::links::extract_policy_links;
use crate::crawler::parser::parse_html;
use crate::crawler::source::extract_source;
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::output::{log_statistics, CrawlStats, FileSink, RecordSink};
use crate::state::{CrawlState, LinkCandidate, PolicyRecord, SiteOutcome};
use crate::CrawlerError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Main crawler coordinator structure
///
/// Owns the run-wide `CrawlState` and the sink records are persisted to.
pub struct Coordinator<S: RecordSink> {
    config: Config,
    sites: Vec<String>,
    client: Client,
    sink: S,
    state: CrawlState,
}

impl<S: RecordSink> Coordinator<S> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `sites` - Listing page URLs, in processing order
    /// * `sink` - Destination for checkpoints and final exports
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawlerError)` - Failed to build the HTTP client
    pub fn new(config: Config, sites: Vec<String>, sink: S) -> Result<Self, CrawlerError> {
        let client = build_http_client(&config.http)?;
        let mut state = CrawlState::new(config.crawler.max_items);
        state.stats_mut().sites_configured = sites.len();

        Ok(Self {
            config,
            sites,
            client,
            sink,
            state,
        })
    }

    /// Runs the crawl over every configured site
    ///
    /// Stops early once the record cap is reached. Writes the final exports if
    /// any record was produced and returns the run statistics.
    ///
    /// # Errors
    ///
    /// Only a failure to write the final exports is returned. Site, document
    /// and checkpoint failures are logged and the run continues.
    pub async fn run(&mut self) -> Result<CrawlStats, CrawlerError> {
        let sites = self.sites.clone();
        let total = sites.len();
        let start_time = std::time::Instant::now();

        tracing::info!(
            sites = total,
            max_items = self.state.max_items(),
            "Starting crawl"
        );

        for (index, site) in sites.iter().enumerate() {
            let ordinal = index + 1;
            self.state.enter_site(ordinal);
            tracing::info!("Crawling site {}/{}: {}", ordinal, total, site);

            let outcome = match self.crawl_site(site).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(site = %site, error = %e, "Site failed, moving on");
                    self.state.stats_mut().sites_failed += 1;
                    continue;
                }
            };

            if outcome == SiteOutcome::NoLinks {
                tracing::warn!(site = %site, "No policy links found, skipping site");
                self.state.stats_mut().sites_without_links += 1;
                continue;
            }

            self.state.stats_mut().sites_completed += 1;
            tracing::info!(
                site = %site,
                total = self.state.total_crawled(),
                "Finished site"
            );

            if outcome.ran_link_loop() {
                self.checkpoint();
            }

            if self.state.cap_reached() {
                tracing::info!(
                    max_items = self.state.max_items(),
                    "Record cap reached, stopping crawl"
                );
                break;
            }
        }

        self.state.stats_mut().cap_reached = self.state.cap_reached();

        if self.state.total_crawled() > 0 {
            let exports = self.sink.save_final(self.state.records())?;
            tracing::info!(
                json = %exports.json.display(),
                csv = %exports.csv.display(),
                txt = %exports.txt.display(),
                "Saved final exports"
            );
        } else {
            tracing::warn!("No policy records were collected");
        }

        tracing::info!(
            "Crawl completed in {:.1}s",
            start_time.elapsed().as_secs_f64()
        );
        log_statistics(self.state.stats());

        Ok(self.state.stats().clone())
    }

    /// Crawls one listing page and its documents
    ///
    /// Returns an error only when the listing page itself cannot be used.
    async fn crawl_site(&mut self, site: &str) -> Result<SiteOutcome, CrawlerError> {
        let base_url = Url::parse(site)?;
        let timeout = Duration::from_secs(self.config.crawler.listing_timeout_secs);

        let body = match fetch_url(&self.client, site, timeout).await {
            FetchResult::Success { final_url, body } => {
                if final_url != site {
                    tracing::debug!(site = %site, final_url = %final_url, "Listing page redirected");
                }
                body
            }
            FetchResult::HttpError { status_code } => {
                return Err(CrawlerError::HttpStatus {
                    url: site.to_string(),
                    status: status_code,
                });
            }
            FetchResult::NetworkError { error } => {
                return Err(CrawlerError::Fetch {
                    url: site.to_string(),
                    message: error,
                });
            }
        };

        let mut candidates = {
            let listing = parse_html(&body);
            extract_policy_links(&listing, &base_url, &self.config.crawler.keywords)
        };

        tracing::info!(site = %site, links = candidates.len(), "Discovered policy links");
        self.state.stats_mut().candidates_discovered += candidates.len();

        if candidates.is_empty() {
            return Ok(SiteOutcome::NoLinks);
        }

        if let Some(limit) = self.config.crawler.max_links_per_site {
            candidates.truncate(limit);
        }

        let count = candidates.len();
        for (index, candidate) in candidates.into_iter().enumerate() {
            if self.state.cap_reached() {
                return Ok(SiteOutcome::CapReached);
            }

            tracing::debug!(
                "Fetching document {}/{}: {}",
                index + 1,
                count,
                candidate.title
            );
            self.crawl_document(candidate, site).await;

            // spacing applies after every attempt, successful or not
            tokio::time::sleep(self.request_delay()).await;
        }

        Ok(SiteOutcome::Completed)
    }

    /// Fetches one document and records it on success
    async fn crawl_document(&mut self, candidate: LinkCandidate, site: &str) {
        let timeout = Duration::from_secs(self.config.crawler.document_timeout_secs);

        match fetch_url(&self.client, &candidate.url, timeout).await {
            FetchResult::Success { final_url, body } => {
                let record = build_record(candidate, site, &body);
                let length = record.content_length;
                if self.state.push(record) {
                    self.state.stats_mut().documents_ok += 1;
                    tracing::info!(
                        url = %final_url,
                        content_length = length,
                        total = self.state.total_crawled(),
                        "Recorded policy document"
                    );
                }
            }
            FetchResult::HttpError { status_code } => {
                self.state.stats_mut().documents_skipped += 1;
                tracing::warn!(
                    url = %candidate.url,
                    status = status_code,
                    "Document not accessible, skipping"
                );
            }
            FetchResult::NetworkError { error } => {
                self.state.stats_mut().documents_failed += 1;
                tracing::warn!(url = %candidate.url, error = %error, "Document fetch failed");
            }
        }
    }

    /// Persists all records so far, tagged with the current site's ordinal
    fn checkpoint(&mut self) {
        if self.state.total_crawled() == 0 {
            return;
        }

        let ordinal = self.state.current_site();
        if let Err(e) = self.sink.save_progress(self.state.records(), ordinal) {
            tracing::error!(site = ordinal, error = %e, "Failed to save progress checkpoint");
        }
    }

    fn request_delay(&self) -> Duration {
        Duration::from_millis(self.config.crawler.request_delay_ms)
    }

    /// The run-wide crawl state
    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    /// The record sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the coordinator, returning the accumulated state and the sink
    pub fn into_parts(self) -> (CrawlState, S) {
        (self.state, self.sink)
    }
}

/// Builds a record from a fetched document body
///
/// Extraction is total, so this never fails.
fn build_record(candidate: LinkCandidate, site: &str, body: &str) -> PolicyRecord {
    let document = parse_html(body);
    let content = extract_policy_content(&document);
    let publication_date = extract_publication_date(&document);
    let source = extract_source(&document, site);

    PolicyRecord::new(candidate, site, publication_date, source, content)
}

/// Runs a complete crawl writing to files in the configured output directory
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Crawl each site in order, checkpointing after each one
/// 3. Write the final JSON, CSV and TXT exports
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `sites` - Listing page URLs, in processing order
///
/// # Returns
///
/// * `Ok(CrawlStats)` - Crawl completed successfully
/// * `Err(CrawlerError)` - Crawl failed with an error
///
/// # Example
///
/// ```no_run
/// use policy_crawler::config::{load_site_list, Config};
/// use policy_crawler::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let sites = load_site_list(Path::new("websites.txt"))?;
/// run_crawl(Config::default(), sites).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config, sites: Vec<String>) -> Result<CrawlStats, CrawlerError> {
    let sink = FileSink::new(&config.output.directory, config.output.mode);
    let mut coordinator = Coordinator::new(config, sites, sink)?;
    coordinator.run().await
}

/// Link limit for single-site runs when none is configured
pub const SINGLE_SITE_LINK_LIMIT: usize = 20;

/// Crawls a single listing page with the single-site output layout
///
/// Fixed export file names are used in place of timestamped ones, and only
/// the first 20 links are followed unless a per-site limit is configured.
pub async fn run_single_site(
    mut config: Config,
    site: String,
) -> Result<CrawlStats, CrawlerError> {
    apply_single_site_defaults(&mut config);
    run_crawl(config, vec![site]).await
}

/// Switches `config` to the single-site layout and link limit
///
/// A configured `max-links-per-site` is kept.
pub fn apply_single_site_defaults(config: &mut Config) {
    config.output.mode = OutputMode::SingleSite;
    config
        .crawler
        .max_links_per_site
        .get_or_insert(SINGLE_SITE_LINK_LIMIT);
}
