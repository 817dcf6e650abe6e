//! Run statistics
//!
//! Counters are updated by the coordinator as the run progresses and logged
//! once when it ends.

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Number of listing URLs in the site list
    pub sites_configured: usize,

    /// Sites whose link loop ran
    pub sites_completed: usize,

    /// Sites whose listing page could not be fetched
    pub sites_failed: usize,

    /// Sites whose listing page yielded no qualifying links
    pub sites_without_links: usize,

    /// Link candidates discovered across all listing pages
    pub candidates_discovered: usize,

    /// Documents fetched and turned into records
    pub documents_ok: usize,

    /// Documents answered with a non-200 status
    pub documents_skipped: usize,

    /// Documents that failed at the network level
    pub documents_failed: usize,

    /// Records held at the end of the run
    pub records: usize,

    /// Whether the global cap stopped the run early
    pub cap_reached: bool,
}

impl CrawlStats {
    /// Total document fetch attempts
    pub fn documents_attempted(&self) -> usize {
        self.documents_ok + self.documents_skipped + self.documents_failed
    }
}

/// Logs the end-of-run summary
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn log_statistics(stats: &CrawlStats) {
    tracing::info!("=== Crawl Statistics ===");
    tracing::info!(
        configured = stats.sites_configured,
        completed = stats.sites_completed,
        failed = stats.sites_failed,
        without_links = stats.sites_without_links,
        "Sites"
    );
    tracing::info!(
        discovered = stats.candidates_discovered,
        attempted = stats.documents_attempted(),
        ok = stats.documents_ok,
        skipped = stats.documents_skipped,
        failed = stats.documents_failed,
        "Documents"
    );
    tracing::info!(
        records = stats.records,
        cap_reached = stats.cap_reached,
        "Crawl finished with {} policy records",
        stats.records
    );
}
