//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with bounded timeouts
//! - HTML parsing and link extraction
//! - Memoized external link checking
//! - Frontier bookkeeping and overall crawl coordination

mod checker;
mod coordinator;
mod diagnostics;
mod fetcher;
mod frontier;
mod mode;
mod parser;

pub use checker::LinkChecker;
pub use coordinator::{Coordinator, CrawlReport};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use fetcher::{
    build_http_client, build_http_clients, describe_error, fetch_url, is_html, FetchResult,
    HttpClients,
};
pub use frontier::Frontier;
pub use mode::Mode;
pub use parser::{extract_links, ExtractedLinks};

use crate::config::Config;
use crate::SieveError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate and normalize the seed URL
/// 2. Build the HTTP clients
/// 3. Walk the internal page graph, checking external links as needed
/// 4. Return the finalized table with diagnostics and statistics
///
/// # Arguments
///
/// * `seed` - Absolute URL to start from
/// * `mode` - Which external links to report
/// * `config` - The crawler configuration
///
/// # Example
///
/// ```no_run
/// use linksieve::{crawl, Config, Mode};
///
/// # async fn example() -> Result<(), linksieve::SieveError> {
/// let report = crawl("https://example.com", Mode::Broken, &Config::default()).await?;
/// for row in &report.table.rows {
///     println!("{} {} {}", row.index, row.page, row.link);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn crawl(seed: &str, mode: Mode, config: &Config) -> Result<CrawlReport, SieveError> {
    let coordinator = Coordinator::new(seed, mode, config.clone())?;
    coordinator.run().await
}
