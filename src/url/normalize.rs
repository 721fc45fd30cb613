use crate::url::domain::authority;
use crate::UrlError;
use url::{ParseError, Url};

/// Parses a seed URL and checks that it has a scheme and a host
///
/// # Arguments
///
/// * `url_str` - The URL string to validate
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL
/// * `Err(UrlError)` - The URL is malformed or lacks a scheme or host
pub fn parse_seed(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| match e {
        ParseError::RelativeUrlWithoutBase => UrlError::MissingScheme,
        ParseError::EmptyHost => UrlError::MissingHost,
        other => UrlError::Parse(other.to_string()),
    })?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingHost),
    }
}

/// Returns true iff the URL has both a non-empty scheme and a non-empty host
///
/// # Examples
///
/// ```
/// use linksieve::url::is_valid;
///
/// assert!(is_valid("http://example.com"));
/// assert!(!is_valid("example.com"));
/// assert!(!is_valid("mailto:someone@example.com"));
/// ```
pub fn is_valid(url_str: &str) -> bool {
    parse_seed(url_str).is_ok()
}

/// Canonicalizes a URL string for use as a set key
///
/// The fragment is dropped, then trailing `/` separators are trimmed. Every
/// trailing separator goes, so the function is idempotent even for paths
/// ending in `//`.
///
/// # Examples
///
/// ```
/// use linksieve::url::normalize;
///
/// assert_eq!(normalize("http://example.com/about/#team"), "http://example.com/about");
/// assert_eq!(normalize("http://example.com/"), "http://example.com");
/// ```
pub fn normalize(url_str: &str) -> String {
    let without_fragment = match url_str.find('#') {
        Some(pos) => &url_str[..pos],
        None => url_str,
    };

    without_fragment.trim_end_matches('/').to_string()
}

/// Validates a seed URL and returns it in the form discovered links take
///
/// The seed goes through the same serialization as links resolved from
/// pages, so `HTTP://Example.com:80/` and `http://example.com` produce the
/// same frontier key.
///
/// # Examples
///
/// ```
/// use linksieve::url::canonical_seed;
///
/// assert_eq!(canonical_seed("HTTP://Example.com:80/#top").unwrap(), "http://example.com");
/// assert!(canonical_seed("example.com").is_err());
/// ```
pub fn canonical_seed(url_str: &str) -> Result<String, UrlError> {
    let parsed = parse_seed(&normalize(url_str.trim()))?;
    Ok(normalize(parsed.as_str()))
}

/// Computes the scheme-independent identity of a page: host + path
///
/// Used only when deduplicating final results, so that `http://x/a` and
/// `https://x/a` collapse into a single row. Query and fragment are ignored.
///
/// # Examples
///
/// ```
/// use linksieve::url::page_identity;
///
/// assert_eq!(page_identity("https://example.com/a"), "example.com/a");
/// assert_eq!(page_identity("http://example.com/a"), "example.com/a");
/// ```
pub fn page_identity(url_str: &str) -> String {
    match Url::parse(url_str) {
        Ok(url) => {
            let host = authority(&url).unwrap_or_default();
            format!("{}{}", host, url.path().trim_end_matches('/'))
        }
        Err(_) => {
            // Unparseable: strip whatever precedes "//" and hope for the best
            let rest = url_str.split("//").last().unwrap_or(url_str);
            normalize(rest)
        }
    }
}
