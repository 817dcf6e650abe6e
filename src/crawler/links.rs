//! Policy link discovery on listing pages
//!
//! Selector strategies are tried in a fixed priority order. The first strategy
//! producing at least one qualifying anchor wins and later strategies are not
//! consulted, even if they would have found more links.

use crate::crawler::parser::{inline_text, parse_selectors};
use crate::state::LinkCandidate;
use crate::url::resolve_link;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

/// Link strategies, highest priority first
const LINK_SELECTORS: [&str; 6] = [
    r#"a[href*=".shtml"]"#,
    r#"a[href*=".html"]"#,
    "li a",
    ".list a",
    ".news-list a",
    ".content a",
];

/// Minimum title length (exclusive), in characters
const MIN_TITLE_CHARS: usize = 5;

static LINK_STRATEGIES: LazyLock<Vec<Selector>> =
    LazyLock::new(|| parse_selectors(&LINK_SELECTORS));

/// Returns true if anchor text looks like a policy document title
///
/// The trimmed text must be longer than five characters and contain at least
/// one keyword.
///
/// # Examples
///
/// ```
/// use policy_crawler::crawler::qualifies;
///
/// let keywords = vec!["通知".to_string(), "公告".to_string()];
/// assert!(qualifies("国家卫健委办公厅通知", &keywords));
/// assert!(!qualifies("首页", &keywords));
/// assert!(!qualifies("这是一个链接", &keywords));
/// ```
pub fn qualifies(title: &str, keywords: &[String]) -> bool {
    let title = title.trim();
    title.chars().count() > MIN_TITLE_CHARS && keywords.iter().any(|k| title.contains(k.as_str()))
}

/// Extracts policy document candidates from a listing page
///
/// # Arguments
///
/// * `document` - The parsed listing page
/// * `base_url` - URL of the listing page, for resolving relative hrefs
/// * `keywords` - Title keywords that mark a policy link
///
/// # Returns
///
/// Candidates in document order. Duplicates are kept. Empty if no strategy
/// found a qualifying anchor.
pub fn extract_policy_links(
    document: &Html,
    base_url: &Url,
    keywords: &[String],
) -> Vec<LinkCandidate> {
    LINK_STRATEGIES
        .iter()
        .map(|selector| candidates_for(document, selector, base_url, keywords))
        .find(|candidates| !candidates.is_empty())
        .unwrap_or_default()
}

/// Applies one strategy to the document
fn candidates_for(
    document: &Html,
    selector: &Selector,
    base_url: &Url,
    keywords: &[String],
) -> Vec<LinkCandidate> {
    document
        .select(selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            let title = inline_text(anchor);
            if !qualifies(&title, keywords) {
                return None;
            }

            let url = resolve_link(href, base_url)?;
            Some(LinkCandidate {
                title: title.trim().to_string(),
                url,
            })
        })
        .collect()
}
