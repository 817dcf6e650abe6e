//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building one HTTP client with browser-like default headers
//! - GET requests with a per-request timeout
//! - Error classification into skip/failure results
//!
//! Fetches are never retried; the caller decides whether a failure skips an
//! item or aborts a site.

use crate::config::HttpConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// The server answered 200 OK
    Success {
        /// Final URL after redirects
        final_url: String,
        /// Page body decoded as UTF-8
        body: String,
    },

    /// The server answered with any status other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, DNS failure, timeout, body read)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with the configured user agent and Accept header
///
/// # Arguments
///
/// * `config` - The request header configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use policy_crawler::config::HttpConfig;
/// use policy_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if let Ok(accept) = HeaderValue::from_str(&config.accept) {
        headers.insert(ACCEPT, accept);
    } else {
        tracing::warn!(accept = %config.accept, "Ignoring invalid Accept header value");
    }

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a request timeout
///
/// # Result Mapping
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200 | `Success` |
/// | Any other status | `HttpError` |
/// | Timeout | `NetworkError` |
/// | Connection refused / DNS | `NetworkError` |
/// | Body read failure | `NetworkError` |
///
/// The body is decoded as UTF-8 regardless of the declared charset; invalid
/// sequences are replaced.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `timeout` - Whole-request timeout
pub async fn fetch_url(client: &Client, url: &str, timeout: Duration) -> FetchResult {
    let response = match client.get(url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();
    if status != StatusCode::OK {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match response.bytes().await {
        Ok(bytes) => FetchResult::Success {
            final_url,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        },
        Err(e) => classify_error(&e),
    }
}

/// Maps a transport error to a `NetworkError` with a short description
fn classify_error(e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        format!("Request timeout: {}", e)
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    };

    FetchResult::NetworkError { error }
}
