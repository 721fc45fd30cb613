//! Report module for shaping and exporting crawl results
//!
//! This module handles:
//! - Deduplicating, sorting and indexing result rows
//! - Writing the result table as CSV or markdown
//! - Choosing where exported tables live on disk
//! - Printing run statistics and diagnostics

mod csv_writer;
mod export;
mod finalize;
mod markdown;
pub mod stats;
mod traits;

pub use csv_writer::CsvTableWriter;
pub use export::{export_path, export_table, export_table_at, site_folder_name, writer_for};
pub use finalize::{finalize, ExternalLinkRecord, Row, Table};
pub use markdown::{format_markdown_table, MarkdownTableWriter};
pub use stats::{print_diagnostics, print_statistics, CrawlStatistics};
pub use traits::TableWriter;
