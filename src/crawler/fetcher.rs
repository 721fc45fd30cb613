//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with a browser-like user agent and bounded timeouts
//! - GET requests for internal pages
//! - Error classification for transport failures
//!
//! Non-2xx statuses and non-HTML content are not fetcher errors: they are
//! reported in the result and classified by the caller.

use crate::config::Config;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// A response was received
    Response {
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value (empty if absent)
        content_type: String,
        /// Page body; only read for HTML responses, empty otherwise
        body: String,
    },

    /// Network error (connection refused, timeout, malformed response, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// The pair of clients a crawl needs
#[derive(Debug, Clone)]
pub struct HttpClients {
    /// Follows redirects; used for pages and for resolving 301 targets
    pub follow: Client,
    /// Never follows redirects; used for the first probe of an external link
    pub no_redirect: Client,
}

/// Builds an HTTP client with the configured identity and timeout
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `redirects` - Redirect policy for this client
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use linksieve::config::Config;
/// use linksieve::crawler::build_http_client;
/// use reqwest::redirect::Policy;
///
/// let client = build_http_client(&Config::default(), Policy::none()).unwrap();
/// ```
pub fn build_http_client(config: &Config, redirects: Policy) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.crawler.request_timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.value.as_str())
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(redirects)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds both clients used during a crawl
pub fn build_http_clients(config: &Config) -> Result<HttpClients, reqwest::Error> {
    Ok(HttpClients {
        follow: build_http_client(config, Policy::default())?,
        no_redirect: build_http_client(config, Policy::none())?,
    })
}

/// Returns true if a Content-Type header value denotes an HTML document
pub fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}

/// Turns a transport error into a short human-readable reason
pub fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}

/// Fetches a URL with a single GET request
///
/// Never fails: transport problems come back as `FetchResult::NetworkError`.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            return FetchResult::NetworkError {
                error: describe_error(&e),
            }
        }
    };

    let status_code = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html(&content_type) {
        return FetchResult::Response {
            status_code,
            content_type,
            body: String::new(),
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Response {
            status_code,
            content_type,
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: describe_error(&e),
        },
    }
}
