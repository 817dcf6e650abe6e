//! Field extractors for policy document pages
//!
//! Each extractor walks an ordered fallback chain and stops at the first
//! candidate that satisfies it. All of them are total: when nothing matches
//! they return a sentinel instead of an error.

use crate::crawler::parser::{block_text, page_text, parse_selectors};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Returned when a page has no body to extract from
pub const CONTENT_UNAVAILABLE: &str = "无法提取内容";

/// Returned when no date label is found
pub const UNKNOWN_DATE: &str = "未知日期";

/// Content containers, highest priority first
const CONTENT_SELECTORS: [&str; 8] = [
    "div.content",
    "div.TRS_Editor",
    "div.article-content",
    "div.text",
    "div#content",
    "div.main-content",
    ".article-content",
    ".content-main",
];

/// Subtrees dropped from a matched content container
const CONTENT_NOISE: [&str; 5] = ["script", "style", "nav", "header", "footer"];

/// Subtrees dropped from the body fallback
const BODY_NOISE: [&str; 6] = ["script", "style", "nav", "header", "footer", "aside"];

/// A container's text must be longer than this to be accepted
const MIN_CONTENT_CHARS: usize = 100;

/// Meta tags naming the publisher, highest priority first
const META_SOURCE_SELECTORS: [&str; 4] = [
    r#"meta[name="source"]"#,
    r#"meta[name="origin"]"#,
    r#"meta[name="publisher"]"#,
    r#"meta[property="og:site_name"]"#,
];

/// Meta content must be shorter than this to be accepted
const MAX_META_CHARS: usize = 100;

/// Date label patterns, highest priority first
const DATE_PATTERNS: [&str; 4] = [
    r"发布时间[:：]\s*([0-9]{4}-[0-9]{2}-[0-9]{2})",
    r"发布日期[:：]\s*([0-9]{4}-[0-9]{2}-[0-9]{2})",
    r"时间[:：]\s*([0-9]{4}-[0-9]{2}-[0-9]{2})",
    r"发表时间[:：]\s*([0-9]{4}-[0-9]{2}-[0-9]{2})",
];

static CONTENT_CONTAINERS: LazyLock<Vec<Selector>> =
    LazyLock::new(|| parse_selectors(&CONTENT_SELECTORS));

static BODY: LazyLock<Option<Selector>> =
    LazyLock::new(|| parse_selectors(&["body"]).into_iter().next());

static META_SOURCES: LazyLock<Vec<Selector>> =
    LazyLock::new(|| parse_selectors(&META_SOURCE_SELECTORS));

static DATE_LABELS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile_patterns(&DATE_PATTERNS));

/// Compiles regex patterns, keeping their order
pub(crate) fn compile_patterns(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::error!(%pattern, error = %e, "Invalid extraction pattern");
                None
            }
        })
        .collect()
}

/// Returns the first capture group of the first pattern matching `text`
///
/// Pattern order takes priority over position in the text.
pub(crate) fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extracts the policy body text
///
/// # Fallback Chain
///
/// 1. For each content selector, the first matching node's text (without
///    script/style/nav/header/footer) is used if longer than 100 characters
/// 2. The whole body (also without aside) regardless of length
/// 3. `无法提取内容` if the page has no body
pub fn extract_policy_content(document: &Html) -> String {
    CONTENT_CONTAINERS
        .iter()
        .filter_map(|selector| document.select(selector).next())
        .map(|container| block_text(container, &CONTENT_NOISE))
        .find(|text| text.chars().count() > MIN_CONTENT_CHARS)
        .or_else(|| {
            BODY.as_ref()
                .and_then(|selector| document.select(selector).next())
                .map(|body| block_text(body, &BODY_NOISE))
        })
        .unwrap_or_else(|| CONTENT_UNAVAILABLE.to_string())
}

/// Extracts the publication date (`YYYY-MM-DD`) from the full page text
///
/// Returns `未知日期` when no labelled date is found.
///
/// # Example
///
/// ```
/// use policy_crawler::crawler::{extract_publication_date, parse_html};
///
/// let page = parse_html("<p>时间：2024-02-02</p><p>发布时间：2024-01-01</p>");
/// assert_eq!(extract_publication_date(&page), "2024-01-01");
/// ```
pub fn extract_publication_date(document: &Html) -> String {
    first_capture(&DATE_LABELS, &page_text(document)).unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

/// Extracts the raw publisher name from meta tags
///
/// For each meta selector in priority order, only the first matching tag is
/// inspected; its trimmed `content` is returned if non-empty and shorter than
/// 100 characters.
pub fn extract_source_from_meta(document: &Html) -> Option<String> {
    META_SOURCES.iter().find_map(|selector| {
        let tag = document.select(selector).next()?;
        let content = tag.value().attr("content")?.trim();
        let chars = content.chars().count();
        (chars > 0 && chars < MAX_META_CHARS).then(|| content.to_string())
    })
}
