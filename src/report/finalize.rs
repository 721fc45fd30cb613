//! Result finalization: deduplication, ordering and indexing

use crate::crawler::Mode;
use crate::url::page_identity;
use std::collections::BTreeMap;

/// One external link found on one internal page
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExternalLinkRecord {
    /// Normalized URL of the page carrying the link
    pub page: String,

    /// Normalized external URL
    pub link: String,

    /// Resolved destination, in redirected mode only
    pub redirect_to: Option<String>,
}

impl ExternalLinkRecord {
    /// A plain (page, link) pair
    pub fn new(page: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            link: link.into(),
            redirect_to: None,
        }
    }

    /// A (page, link, destination) triple
    pub fn redirected(
        page: impl Into<String>,
        link: impl Into<String>,
        redirect_to: impl Into<String>,
    ) -> Self {
        Self {
            page: page.into(),
            link: link.into(),
            redirect_to: Some(redirect_to.into()),
        }
    }
}

/// One row of the exported table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based position in the sorted table
    pub index: usize,
    pub page: String,
    pub link: String,
    pub redirect_to: Option<String>,
}

/// The final, ordered result of a crawl together with its column schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub mode: Mode,
    pub rows: Vec<Row>,
}

impl Table {
    /// Column headers for this table's mode
    pub fn columns(&self) -> &'static [&'static str] {
        self.mode.columns()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of a row, matching `columns()`
    pub fn cells(&self, row: &Row) -> Vec<String> {
        let mut cells = vec![row.index.to_string(), row.page.clone(), row.link.clone()];
        if self.columns().len() > 3 {
            cells.push(row.redirect_to.clone().unwrap_or_default());
        }
        cells
    }
}

/// Turns the records accumulated during a crawl into the exported table
///
/// Records are deduplicated on (page identity, link, destination), where the
/// page identity is host + path and ignores the scheme. When several page
/// URLs collapse into one identity, the lexicographically smallest one is
/// shown. Rows are sorted by page identity, then link, then destination, and
/// numbered from 1.
///
/// The output depends only on the set of records, never on the order they
/// were found in.
pub fn finalize(mode: Mode, records: impl IntoIterator<Item = ExternalLinkRecord>) -> Table {
    let mut unique: BTreeMap<(String, String, Option<String>), String> = BTreeMap::new();

    for record in records {
        let key = (page_identity(&record.page), record.link, record.redirect_to);
        unique
            .entry(key)
            .and_modify(|shown| {
                if record.page < *shown {
                    *shown = record.page.clone();
                }
            })
            .or_insert(record.page);
    }

    let rows = unique
        .into_iter()
        .enumerate()
        .map(|(i, ((_, link, redirect_to), page))| Row {
            index: i + 1,
            page,
            link,
            redirect_to,
        })
        .collect();

    Table { mode, rows }
}
