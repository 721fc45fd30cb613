//! Markdown table output
//!
//! Renders the result table as a GitHub-flavored markdown document, handy
//! for pasting into issues and reviews.

use crate::report::finalize::Table;
use crate::report::traits::TableWriter;
use crate::ExportResult;
use std::io::Write;

/// Writes tables as a markdown document
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownTableWriter;

impl TableWriter for MarkdownTableWriter {
    fn extension(&self) -> &'static str {
        "md"
    }

    fn write_table(&self, table: &Table, out: &mut dyn Write) -> ExportResult<()> {
        out.write_all(format_markdown_table(table).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Formats a result table as markdown
///
/// # Arguments
///
/// * `table` - The finalized table
///
/// # Returns
///
/// A markdown string with a title line and one table
pub fn format_markdown_table(table: &Table) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", table.mode.description()));

    let columns = table.columns();
    md.push_str(&format!("| {} |\n", columns.join(" | ")));
    md.push_str(&format!(
        "|{}\n",
        columns.iter().map(|_| "---|").collect::<String>()
    ));

    for row in &table.rows {
        let cells: Vec<String> = table.cells(row).iter().map(|c| escape_cell(c)).collect();
        md.push_str(&format!("| {} |\n", cells.join(" | ")));
    }

    md.push_str(&format!("\n*{} rows*\n", table.len()));
    md
}

/// Escapes characters that would break a markdown table cell
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}
