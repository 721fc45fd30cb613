//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates:
//! - Managing the frontier and visited set
//! - Fetching internal pages through a bounded pool
//! - Extracting links and feeding new internal pages back into the frontier
//! - Checking external links and applying the mode policy
//! - Finalizing the result table

use crate::config::Config;
use crate::crawler::checker::LinkChecker;
use crate::crawler::diagnostics::{Diagnostic, Diagnostics};
use crate::crawler::fetcher::{build_http_clients, fetch_url, is_html, FetchResult};
use crate::crawler::frontier::Frontier;
use crate::crawler::mode::Mode;
use crate::crawler::parser::{extract_links, ExtractedLinks};
use crate::report::{finalize, CrawlStatistics, ExternalLinkRecord, Table};
use crate::state::OK;
use crate::url::{canonical_seed, normalize, parse_seed, SiteScope};
use crate::{SieveError, UrlError};
use futures::stream::{self, FuturesUnordered, StreamExt};
use reqwest::Client;
use std::collections::HashSet;
use std::time::Instant;

/// Everything a finished crawl hands back to its caller
#[derive(Debug)]
pub struct CrawlReport {
    /// Normalized seed URL
    pub seed: String,

    /// Mode the crawl ran in
    pub mode: Mode,

    /// Sorted, deduplicated, indexed result rows
    pub table: Table,

    /// Non-fatal problems, in the order they happened
    pub diagnostics: Vec<Diagnostic>,

    /// Counters describing the run
    pub statistics: CrawlStatistics,
}

/// Outcome of visiting one internal page
#[derive(Debug)]
struct PageVisit {
    url: String,
    /// None when the page could not contribute links
    links: Option<ExtractedLinks>,
    records: Vec<ExternalLinkRecord>,
}

/// Main crawler coordinator structure
///
/// A coordinator runs a single crawl. Its link-status cache lives as long as
/// the coordinator, so each run starts with nothing memoized.
pub struct Coordinator {
    seed: String,
    scope: SiteScope,
    mode: Mode,
    config: Config,
    client: Client,
    checker: LinkChecker,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `seed` - The URL to start crawling from
    /// * `mode` - Which external links to report
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(SieveError::InvalidSeed)` - The seed lacks a scheme or host
    /// * `Err(SieveError::HttpClient)` - The HTTP clients could not be built
    pub fn new(seed: &str, mode: Mode, config: Config) -> Result<Self, SieveError> {
        let seed = canonical_seed(seed).map_err(|reason| SieveError::InvalidSeed {
            url: normalize(seed.trim()),
            reason,
        })?;
        let parsed = parse_seed(&seed).map_err(|reason| SieveError::InvalidSeed {
            url: seed.clone(),
            reason,
        })?;
        let scope = SiteScope::from_seed(&parsed, config.crawler.host_match).ok_or_else(|| {
            SieveError::InvalidSeed {
                url: seed.clone(),
                reason: UrlError::MissingHost,
            }
        })?;

        let clients = build_http_clients(&config)?;
        let checker = LinkChecker::new(&clients);

        Ok(Self {
            seed,
            scope,
            mode,
            config,
            client: clients.follow,
            checker,
        })
    }

    /// Runs the crawl to completion
    ///
    /// The loop keeps up to `max-concurrent-pages` page visits in flight. The
    /// coordinator alone mutates the frontier, so the visited check and the
    /// insert happen together. The crawl ends when the frontier is empty and
    /// nothing is in flight.
    pub async fn run(&self) -> Result<CrawlReport, SieveError> {
        tracing::info!("Starting {} crawl of {}", self.mode, self.seed);

        let start_time = Instant::now();
        let diagnostics = Diagnostics::new();
        let mut frontier = Frontier::with_seed(self.seed.clone());
        let mut records = Vec::new();
        let mut external_links_found = 0;
        let mut distinct_external = HashSet::new();
        let mut pages_without_links = 0;
        let mut pages_crawled = 0;

        let limit = self.config.crawler.max_concurrent_pages;
        let mut in_flight = FuturesUnordered::new();

        loop {
            while in_flight.len() < limit {
                match frontier.next() {
                    Some(url) => in_flight.push(self.visit(url, &diagnostics)),
                    None => break,
                }
            }

            let Some(visit) = in_flight.next().await else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };

            frontier.complete(&visit.url)?;
            pages_crawled += 1;

            match visit.links {
                Some(links) => {
                    external_links_found += links.external.len();
                    distinct_external.extend(links.external.into_iter().map(|(_, link)| link));
                    for link in links.internal {
                        frontier.push(link);
                    }
                }
                None => pages_without_links += 1,
            }
            records.extend(visit.records);

            if pages_crawled % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages crawled, {} in frontier, {} in flight",
                    pages_crawled,
                    frontier.pending_len(),
                    in_flight.len()
                );
            }
        }
        drop(in_flight);

        let table = finalize(self.mode, records);
        let diagnostics = diagnostics.into_vec();

        let statistics = CrawlStatistics {
            pages_visited: frontier.visited_len(),
            pages_without_links,
            external_links_found,
            distinct_external_links: distinct_external.len(),
            network_checks: self.checker.checks_performed(),
            rows: table.len(),
            diagnostics: diagnostics.len(),
            elapsed: start_time.elapsed(),
        };

        tracing::info!(
            "Crawl completed: {} pages crawled, {} rows in {:?}",
            statistics.pages_visited,
            statistics.rows,
            statistics.elapsed
        );

        Ok(CrawlReport {
            seed: self.seed.clone(),
            mode: self.mode,
            table,
            diagnostics,
            statistics,
        })
    }

    /// Fetches one page, extracts its links and classifies its external links
    async fn visit(&self, url: String, diagnostics: &Diagnostics) -> PageVisit {
        tracing::info!("Scanning page: {}", url);

        let links = self.fetch_links(&url, diagnostics).await;
        let records = match &links {
            Some(links) => self.classify(&links.external, diagnostics).await,
            None => Vec::new(),
        };

        PageVisit {
            url,
            links,
            records,
        }
    }

    /// Fetches a page and extracts its links
    ///
    /// Returns None, after recording a diagnostic, when the page failed to
    /// load, answered anything but 200, or is not HTML.
    async fn fetch_links(&self, url: &str, diagnostics: &Diagnostics) -> Option<ExtractedLinks> {
        match fetch_url(&self.client, url).await {
            FetchResult::Response {
                status_code,
                content_type,
                body,
                ..
            } => {
                if status_code != OK {
                    diagnostics.record(Diagnostic::PageStatus {
                        url: url.to_string(),
                        status: status_code,
                    });
                    return None;
                }

                if !is_html(&content_type) {
                    diagnostics.record(Diagnostic::NotHtml {
                        url: url.to_string(),
                        content_type,
                    });
                    return None;
                }

                let links = extract_links(&body, url, &self.scope);
                tracing::debug!(
                    "{}: {} internal, {} external links",
                    url,
                    links.internal.len(),
                    links.external.len()
                );
                Some(links)
            }

            FetchResult::NetworkError { error } => {
                diagnostics.record(Diagnostic::PageFetchFailed {
                    url: url.to_string(),
                    error,
                });
                None
            }
        }
    }

    /// Applies the mode policy to a page's external links
    async fn classify(
        &self,
        external: &HashSet<(String, String)>,
        diagnostics: &Diagnostics,
    ) -> Vec<ExternalLinkRecord> {
        if !self.mode.needs_check() {
            return external
                .iter()
                .filter_map(|(page, link)| self.mode.select(page, link, None))
                .collect();
        }

        let mode = self.mode;
        stream::iter(external)
            .map(|(page, link)| async move {
                let status = self.checker.check(link, diagnostics).await;
                mode.select(page, link, Some(&status))
            })
            .buffer_unordered(self.config.crawler.max_concurrent_checks)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}
