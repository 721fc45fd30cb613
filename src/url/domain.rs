use url::Url;

/// Extracts the authority (lowercase host plus explicit port) from a URL
///
/// Ports matter here: two servers on the same host but different ports are
/// different sites.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use linksieve::url::authority;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(authority(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(authority(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(authority(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_subdomain() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(authority(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_explicit_port_kept() {
        let url = Url::parse("https://example.com:8443/").unwrap();
        assert_eq!(authority(&url), Some("example.com:8443".to_string()));
    }

    #[test]
    fn test_default_port_dropped() {
        let url = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(authority(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_uppercase_converted_to_lowercase() {
        let url = Url::parse("https://Example.COM/").unwrap();
        assert_eq!(authority(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_no_host() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        assert_eq!(authority(&url), None);
    }
}
