//! External link checker
//!
//! Resolves the live status of external links, at most one network check per
//! distinct URL per run. Concurrent callers asking for the same URL wait on
//! the same in-flight check instead of issuing their own.

use crate::crawler::diagnostics::{Diagnostic, Diagnostics};
use crate::crawler::fetcher::{describe_error, HttpClients};
use crate::state::{LinkStatus, MOVED_PERMANENTLY};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

/// Memoizing checker for external links
#[derive(Debug)]
pub struct LinkChecker {
    /// Client with redirects disabled, for the first request
    probe: Client,

    /// Client following redirects to completion, for 301 targets
    follow: Client,

    /// One cell per URL; the cell is filled by exactly one check
    cache: Mutex<HashMap<String, Arc<OnceCell<LinkStatus>>>>,

    /// Number of checks that actually went to the network
    checks: AtomicUsize,
}

impl LinkChecker {
    /// Creates a checker with an empty cache
    pub fn new(clients: &HttpClients) -> Self {
        Self {
            probe: clients.no_redirect.clone(),
            follow: clients.follow.clone(),
            cache: Mutex::new(HashMap::new()),
            checks: AtomicUsize::new(0),
        }
    }

    /// Returns the status of `url`, checking it over the network on first use
    ///
    /// Transport failures are recorded in `diagnostics` once, when the check
    /// actually runs; the failed status is cached like any other.
    pub async fn check(&self, url: &str, diagnostics: &Diagnostics) -> LinkStatus {
        let cell = {
            let mut cache = self
                .cache
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            cache.entry(url.to_string()).or_default().clone()
        };

        if let Some(status) = cell.get() {
            tracing::debug!("Cache hit for {}", url);
            return status.clone();
        }

        cell.get_or_init(|| self.probe_link(url, diagnostics))
            .await
            .clone()
    }

    /// Number of network checks performed so far
    pub fn checks_performed(&self) -> usize {
        self.checks.load(Ordering::Relaxed)
    }

    /// Performs the actual check
    ///
    /// # Request Flow
    ///
    /// 1. GET with redirects disabled
    /// 2. If the answer is 301, GET again following redirects to completion
    ///    and report the final URL; the status stays 301
    /// 3. Any other status is returned as is
    /// 4. A transport failure on either request yields an unreachable status
    async fn probe_link(&self, url: &str, diagnostics: &Diagnostics) -> LinkStatus {
        self.checks.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Checking link: {}", url);

        let status = match self.probe.get(url).send().await {
            Ok(response) => response.status().as_u16(),
            Err(e) => return self.failed(url, &e, diagnostics),
        };

        if status != MOVED_PERMANENTLY {
            return LinkStatus::answered(status);
        }

        match self.follow.get(url).send().await {
            Ok(response) => LinkStatus::moved(response.url().to_string()),
            Err(e) => self.failed(url, &e, diagnostics),
        }
    }

    fn failed(&self, url: &str, error: &reqwest::Error, diagnostics: &Diagnostics) -> LinkStatus {
        diagnostics.record(Diagnostic::CheckFailed {
            url: url.to_string(),
            error: describe_error(error),
        });
        LinkStatus::unreachable()
    }
}
