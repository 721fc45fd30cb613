//! Crawl statistics and run summary printing

use crate::crawler::Diagnostic;
use std::time::Duration;

/// Counters describing one finished crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Internal pages that reached the visited state
    pub pages_visited: usize,

    /// Visited pages that contributed no links (failed, non-HTML or non-200)
    pub pages_without_links: usize,

    /// (page, external link) pairs found across all pages
    pub external_links_found: usize,

    /// Distinct external URLs found
    pub distinct_external_links: usize,

    /// Network checks actually performed against external URLs
    pub network_checks: usize,

    /// Rows in the final table
    pub rows: usize,

    /// Diagnostics recorded during the crawl
    pub diagnostics: usize,

    /// Wall-clock time of the crawl
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Share of visited pages that contributed links, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.pages_visited == 0 {
            return 0.0;
        }
        let contributed = self.pages_visited.saturating_sub(self.pages_without_links);
        (contributed as f64 / self.pages_visited as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Pages:");
    println!("  Visited: {}", stats.pages_visited);
    println!("  Without links: {}", stats.pages_without_links);
    println!();

    println!("External links:");
    println!("  Found on pages: {}", stats.external_links_found);
    println!("  Distinct: {}", stats.distinct_external_links);
    println!("  Network checks: {}", stats.network_checks);
    println!();

    println!("Rows in result: {}", stats.rows);
    println!("Diagnostics: {}", stats.diagnostics);
    println!("Elapsed: {:.2}s", stats.elapsed.as_secs_f64());

    println!(
        "Success Rate: {:.1}% ({} / {} pages contributed links)",
        stats.success_rate(),
        stats.pages_visited.saturating_sub(stats.pages_without_links),
        stats.pages_visited
    );
}

/// Prints the diagnostics of a crawl, one per line
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    println!("=== Diagnostics ({}) ===\n", diagnostics.len());
    for diagnostic in diagnostics {
        println!("  - {}", diagnostic);
    }
    println!();
}
