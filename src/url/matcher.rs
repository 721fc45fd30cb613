use crate::url::domain::authority;
use serde::Deserialize;
use url::Url;

/// Strategy used to decide whether a link's host belongs to the crawled site
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostMatch {
    /// The site host appears anywhere inside the link host.
    /// Loose: `notexample.com` counts as internal to `example.com`.
    #[default]
    Contains,
    /// Hosts must be identical
    Exact,
    /// The link host is the site host or one of its subdomains
    Subdomain,
}

impl HostMatch {
    /// Checks a candidate authority against the site authority
    ///
    /// # Examples
    ///
    /// ```
    /// use linksieve::url::HostMatch;
    ///
    /// assert!(HostMatch::Contains.matches("example.com", "blog.example.com"));
    /// assert!(HostMatch::Contains.matches("example.com", "notexample.com"));
    /// assert!(!HostMatch::Subdomain.matches("example.com", "notexample.com"));
    /// assert!(!HostMatch::Exact.matches("example.com", "blog.example.com"));
    /// ```
    pub fn matches(&self, site: &str, candidate: &str) -> bool {
        match self {
            Self::Contains => candidate.contains(site),
            Self::Exact => candidate == site,
            Self::Subdomain => {
                candidate == site || candidate.ends_with(&format!(".{}", site))
            }
        }
    }
}

/// The host a crawl is confined to, together with the matching strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteScope {
    authority: String,
    host_match: HostMatch,
}

impl SiteScope {
    /// Builds the scope of a crawl from its seed URL
    ///
    /// Returns None if the seed has no host.
    pub fn from_seed(seed: &Url, host_match: HostMatch) -> Option<Self> {
        Some(Self {
            authority: authority(seed)?,
            host_match,
        })
    }

    /// The site authority (host plus explicit port)
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Returns true if the URL belongs to the crawled site
    ///
    /// The comparison is against the seed's authority, not the host of the
    /// page the link was found on: "internal" means internal to the site
    /// being crawled. Under `contains`, a page on `blog.example.com` linking
    /// to `example.com` is still internal to an `example.com` crawl.
    pub fn is_internal(&self, url: &Url) -> bool {
        authority(url)
            .map(|candidate| self.host_match.matches(&self.authority, &candidate))
            .unwrap_or(false)
    }
}
