use url::Url;

/// Resolves an anchor href against the page it was found on
///
/// Absolute hrefs are returned as-is (after URL normalization), relative ones
/// are joined onto `base_url`. Returns None for empty hrefs or hrefs that
/// cannot be joined.
///
/// # Example
///
/// ```
/// use policy_crawler::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://www.nhc.gov.cn/wjw/gfxwjj/list.shtml").unwrap();
/// assert_eq!(
///     resolve_link("./202401/abc.shtml", &base),
///     Some("https://www.nhc.gov.cn/wjw/gfxwjj/202401/abc.shtml".to_string())
/// );
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    base_url.join(href).ok().map(|u| u.to_string())
}
