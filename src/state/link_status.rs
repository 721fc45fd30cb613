//! Result of checking one external link

/// HTTP 200
pub const OK: u16 = 200;

/// HTTP 301, the only redirect code that gets resolved
pub const MOVED_PERMANENTLY: u16 = 301;

/// Live status of an external link, as cached for the duration of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkStatus {
    /// Immediate status code; None when the link could not be reached
    pub status: Option<u16>,

    /// Final destination after following a 301; None otherwise
    pub redirect_to: Option<String>,
}

impl LinkStatus {
    /// A link that answered with a plain status code
    pub fn answered(status: u16) -> Self {
        Self {
            status: Some(status),
            redirect_to: None,
        }
    }

    /// A link that answered 301 and resolved to `destination`
    pub fn moved(destination: impl Into<String>) -> Self {
        Self {
            status: Some(MOVED_PERMANENTLY),
            redirect_to: Some(destination.into()),
        }
    }

    /// A link that could not be reached at all
    pub fn unreachable() -> Self {
        Self::default()
    }

    /// Returns true if the link did not answer
    pub fn is_unreachable(&self) -> bool {
        self.status.is_none()
    }

    /// Broken means unreachable, or any status other than 200 and 301
    pub fn is_broken(&self) -> bool {
        self.is_unreachable() || !matches!(self.status, Some(OK) | Some(MOVED_PERMANENTLY))
    }

    /// Returns true for an immediate 301
    pub fn is_redirected(&self) -> bool {
        self.status == Some(MOVED_PERMANENTLY)
    }
}
