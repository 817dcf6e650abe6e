use crate::output::CrawlStats;
use crate::state::PolicyRecord;

/// How a single site's pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteOutcome {
    /// Every candidate was attempted
    Completed,

    /// The listing page yielded no qualifying links
    NoLinks,

    /// The global cap was reached while iterating this site's links
    CapReached,
}

impl SiteOutcome {
    /// Returns true if the site's link loop ran and a checkpoint is due
    pub fn ran_link_loop(&self) -> bool {
        matches!(self, Self::Completed | Self::CapReached)
    }
}

/// Run-wide crawl accumulator
///
/// Owned by the coordinator and threaded explicitly through every per-site and
/// per-item step. Records are only ever appended, and `total_crawled` always
/// equals the number of records held.
#[derive(Debug, Clone)]
pub struct CrawlState {
    records: Vec<PolicyRecord>,
    max_items: usize,
    current_site: usize,
    stats: CrawlStats,
}

impl CrawlState {
    /// Creates an empty state with the given global cap
    pub fn new(max_items: usize) -> Self {
        Self {
            records: Vec::new(),
            max_items,
            current_site: 0,
            stats: CrawlStats::default(),
        }
    }

    /// Records accumulated so far, in discovery order
    pub fn records(&self) -> &[PolicyRecord] {
        &self.records
    }

    /// Number of records accumulated so far
    pub fn total_crawled(&self) -> usize {
        self.records.len()
    }

    /// The configured global cap
    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Returns true once the global cap has been reached
    pub fn cap_reached(&self) -> bool {
        self.records.len() >= self.max_items
    }

    /// Appends a record unless the cap has already been reached
    ///
    /// Returns false (and drops the record) when the cap was hit.
    pub fn push(&mut self, record: PolicyRecord) -> bool {
        if self.cap_reached() {
            return false;
        }

        self.records.push(record);
        self.stats.records = self.records.len();
        true
    }

    /// Moves the site cursor to the given 1-based ordinal
    pub fn enter_site(&mut self, ordinal: usize) {
        self.current_site = ordinal;
    }

    /// 1-based ordinal of the site being processed (0 before the first site)
    pub fn current_site(&self) -> usize {
        self.current_site
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut CrawlStats {
        &mut self.stats
    }

    /// Consumes the state, yielding the records
    pub fn into_records(self) -> Vec<PolicyRecord> {
        self.records
    }
}
