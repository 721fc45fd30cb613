//! CSV table output

use crate::report::finalize::Table;
use crate::report::traits::TableWriter;
use crate::ExportResult;
use std::io::Write;

/// Writes tables as RFC 4180 CSV with a header row
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvTableWriter;

impl TableWriter for CsvTableWriter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write_table(&self, table: &Table, out: &mut dyn Write) -> ExportResult<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(table.columns())?;
        for row in &table.rows {
            writer.write_record(table.cells(row))?;
        }
        writer.flush()?;
        Ok(())
    }
}
