//! HTML link extractor
//!
//! This module parses a fetched page and splits its hyperlinks into
//! internal pages (to crawl) and external links (to report).

use crate::url::{normalize, SiteScope};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Links found on one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedLinks {
    /// Normalized absolute URLs of internal pages
    pub internal: HashSet<String>,

    /// (source page, normalized external URL) pairs
    pub external: HashSet<(String, String)>,
}

/// Extracts internal and external links from an HTML page
///
/// Every `<a href>` is resolved against `page_url`. Results without a host
/// (`mailto:`, `javascript:`, ...) are dropped, as are empty and
/// fragment-only hrefs. The rest are normalized and classified against the
/// crawl's site scope.
///
/// The caller must only pass bodies of 200 responses with an HTML content type.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - Normalized URL of the page the HTML came from
/// * `scope` - The site the crawl is confined to
///
/// # Example
///
/// ```
/// use linksieve::crawler::extract_links;
/// use linksieve::url::{HostMatch, SiteScope};
/// use url::Url;
///
/// let seed = Url::parse("http://example.com").unwrap();
/// let scope = SiteScope::from_seed(&seed, HostMatch::Contains).unwrap();
/// let html = r#"<a href="/about">About</a><a href="https://other.org/">Other</a>"#;
///
/// let links = extract_links(html, "http://example.com", &scope);
/// assert!(links.internal.contains("http://example.com/about"));
/// assert_eq!(links.external.len(), 1);
/// ```
pub fn extract_links(html: &str, page_url: &str, scope: &SiteScope) -> ExtractedLinks {
    let mut links = ExtractedLinks::default();

    let base_url = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Cannot resolve links against {}: {}", page_url, e);
            return links;
        }
    };

    let document = Html::parse_document(html);
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    let source_page = normalize(page_url);

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(resolved) = resolve_link(href, &base_url) else {
            continue;
        };

        let target = normalize(resolved.as_str());
        if scope.is_internal(&resolved) {
            links.internal.insert(target);
        } else {
            links.external.insert((source_page.clone(), target));
        }
    }

    links
}

/// Resolves an href to an absolute URL
///
/// Returns None if the link should be excluded:
/// - empty or fragment-only hrefs
/// - hrefs that fail to resolve
/// - results without a host (mailto:, tel:, javascript:, data:)
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;

    match absolute_url.host_str() {
        Some(host) if !host.is_empty() => Some(absolute_url),
        _ => None,
    }
}
