use url::Url;

/// Extracts the lowercase host from a URL string
///
/// Falls back to the text between `//` and the next `/` when the string is
/// not a parseable absolute URL.
///
/// # Examples
///
/// ```
/// use policy_crawler::url::extract_domain;
///
/// assert_eq!(extract_domain("https://WSJKW.ZJ.gov.cn/col/index.html"), Some("wsjkw.zj.gov.cn".to_string()));
/// assert_eq!(extract_domain("wsjkw.sh.gov.cn/list"), Some("wsjkw.sh.gov.cn".to_string()));
/// assert_eq!(extract_domain(""), None);
/// ```
pub fn extract_domain(url: &str) -> Option<String> {
    if let Ok(parsed) = Url::parse(url) {
        if let Some(host) = parsed.host_str() {
            return Some(host.to_lowercase());
        }
    }

    let lower = url.to_lowercase();
    let after_scheme = lower.rsplit("//").next().unwrap_or_default();
    let host = after_scheme.split('/').next().unwrap_or_default();
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

/// Splits the host of a URL into its dot-separated labels
///
/// Returns an empty vector when no host can be found.
pub fn host_segments(url: &str) -> Vec<String> {
    extract_domain(url)
        .map(|host| host.split('.').map(str::to_string).collect())
        .unwrap_or_default()
}
