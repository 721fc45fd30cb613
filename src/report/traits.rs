//! Table writer trait
//!
//! A table writer serializes a finalized result table into one tabular
//! format. The export layer picks a writer and owns the file.

use crate::report::finalize::Table;
use crate::ExportResult;
use std::io::Write;

/// Trait for tabular output formats
pub trait TableWriter {
    /// File extension (without the dot) for files written by this writer
    fn extension(&self) -> &'static str;

    /// Writes the header and every row of `table` to `out`
    ///
    /// # Arguments
    ///
    /// * `table` - The finalized table
    /// * `out` - Destination; the writer flushes it before returning
    fn write_table(&self, table: &Table, out: &mut dyn Write) -> ExportResult<()>;
}
