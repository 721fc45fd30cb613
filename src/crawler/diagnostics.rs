//! Run-level diagnostics
//!
//! Failures that do not stop the crawl are collected here, in the order they
//! happened, and handed back to the caller with the crawl report.

use std::fmt;
use std::sync::Mutex;

/// A non-fatal problem observed during a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An internal page could not be fetched at all
    PageFetchFailed { url: String, error: String },

    /// An internal page answered with a status other than 200
    PageStatus { url: String, status: u16 },

    /// An internal page is not an HTML document
    NotHtml { url: String, content_type: String },

    /// An external link could not be checked
    CheckFailed { url: String, error: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageFetchFailed { url, error } => {
                write!(f, "Failed to scan page {}: {}", url, error)
            }
            Self::PageStatus { url, status } => {
                write!(f, "Failed to scan page {}, status code: {}", url, status)
            }
            Self::NotHtml { url, content_type } => write!(
                f,
                "Page {} is not an HTML document (Content-Type: {})",
                url, content_type
            ),
            Self::CheckFailed { url, error } => {
                write!(f, "Failed to check link {}: {}", url, error)
            }
        }
    }
}

/// Ordered, shareable collector of diagnostics for one run
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl Diagnostics {
    /// Creates an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a diagnostic and logs it
    pub fn record(&self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic);
    }

    /// Consumes the collector, returning diagnostics in recording order
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let diagnostics = Diagnostics::new();

        diagnostics.record(Diagnostic::PageStatus {
            url: "http://example.com/a".to_string(),
            status: 404,
        });
        diagnostics.record(Diagnostic::CheckFailed {
            url: "http://dead.example/x".to_string(),
            error: "request timed out".to_string(),
        });

        let entries = diagnostics.into_vec();
        assert_eq!(entries.len(), 2);
        assert!(matches!(&entries[0], Diagnostic::PageStatus { url, status: 404 } if url == "http://example.com/a"));
        assert!(matches!(&entries[1], Diagnostic::CheckFailed { url, .. } if url == "http://dead.example/x"));
    }

    #[test]
    fn test_display_messages() {
        let not_html = Diagnostic::NotHtml {
            url: "http://example.com/file.pdf".to_string(),
            content_type: "application/pdf".to_string(),
        };
        assert_eq!(
            not_html.to_string(),
            "Page http://example.com/file.pdf is not an HTML document (Content-Type: application/pdf)"
        );

        let status = Diagnostic::PageStatus {
            url: "http://example.com/gone".to_string(),
            status: 410,
        };
        assert_eq!(
            status.to_string(),
            "Failed to scan page http://example.com/gone, status code: 410"
        );
    }
}
