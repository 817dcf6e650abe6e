use serde::Deserialize;

/// Title keywords that mark an anchor as a policy document link
pub const DEFAULT_KEYWORDS: [&str; 9] = [
    "通知", "公告", "指南", "办法", "规定", "意见", "方案", "政策", "解读",
];

/// Desktop browser user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Accept header favouring HTML
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Listing page used by the single-site variant when no URL is given
pub const DEFAULT_SINGLE_SITE_URL: &str = "https://www.nhc.gov.cn/wjw/gfxwjj/list.shtml";

/// Main configuration structure for Policy-Crawler
///
/// Every section falls back to its defaults, so an empty TOML document is a
/// valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Global cap on recorded documents across all sites
    #[serde(rename = "max-items")]
    pub max_items: usize,

    /// Pause after every document fetch attempt (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Timeout for listing page requests (seconds)
    #[serde(rename = "listing-timeout-secs")]
    pub listing_timeout_secs: u64,

    /// Timeout for document page requests (seconds)
    #[serde(rename = "document-timeout-secs")]
    pub document_timeout_secs: u64,

    /// Only the first N candidates of each site are fetched
    #[serde(rename = "max-links-per-site")]
    pub max_links_per_site: Option<usize>,

    /// Title keywords for link discovery
    pub keywords: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_items: 1000,
            request_delay_ms: 1000,
            listing_timeout_secs: 15,
            document_timeout_secs: 20,
            max_links_per_site: None,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Request header configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    pub accept: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving checkpoints and final exports
    pub directory: String,

    /// File naming and layout of the exports
    pub mode: OutputMode,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            mode: OutputMode::MultiSite,
        }
    }
}

/// Layout of the final exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Timestamped files with a website column
    #[default]
    MultiSite,

    /// Fixed file names, no website column
    SingleSite,
}
