//! Writing result tables to disk
//!
//! Exports land at `<directory>/<site>/<mode>/<timestamp>.<ext>`. Directories
//! are created on demand and an existing file is never replaced.

use crate::config::{OutputConfig, OutputFormat};
use crate::crawler::Mode;
use crate::report::csv_writer::CsvTableWriter;
use crate::report::finalize::Table;
use crate::report::markdown::MarkdownTableWriter;
use crate::report::traits::TableWriter;
use crate::{ExportError, ExportResult};
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Returns the writer for an output format
pub fn writer_for(format: OutputFormat) -> Box<dyn TableWriter> {
    match format {
        OutputFormat::Csv => Box::new(CsvTableWriter),
        OutputFormat::Markdown => Box::new(MarkdownTableWriter),
    }
}

/// Directory name for a site: the seed without its scheme, `/` replaced by `-`
pub fn site_folder_name(seed: &str) -> String {
    let without_scheme = seed.split_once("://").map_or(seed, |(_, rest)| rest);
    without_scheme.trim_end_matches('/').replace('/', "-")
}

/// Full path of an export made at `at`
pub fn export_path(seed: &str, mode: Mode, output: &OutputConfig, at: DateTime<Local>) -> PathBuf {
    Path::new(&output.directory)
        .join(site_folder_name(seed))
        .join(mode.folder_name())
        .join(format!(
            "{}.{}",
            at.format(TIMESTAMP_FORMAT),
            writer_for(output.format).extension()
        ))
}

/// Exports a table, timestamped now
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(ExportError::EmptyTable)` - The table has no rows; nothing is written
/// * `Err(ExportError::AlreadyExists)` - The target file exists
pub fn export_table(table: &Table, seed: &str, output: &OutputConfig) -> ExportResult<PathBuf> {
    export_table_at(table, seed, output, Local::now())
}

/// Exports a table with an explicit timestamp
pub fn export_table_at(
    table: &Table,
    seed: &str,
    output: &OutputConfig,
    at: DateTime<Local>,
) -> ExportResult<PathBuf> {
    let path = export_path(seed, table.mode, output, at);
    write_export(table, &path, writer_for(output.format).as_ref())?;
    Ok(path)
}

/// Writes `table` to a new file at `path`
///
/// A file left incomplete by a failed write is removed.
fn write_export(table: &Table, path: &Path, writer: &dyn TableWriter) -> ExportResult<()> {
    if table.is_empty() {
        return Err(ExportError::EmptyTable);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => ExportError::AlreadyExists(path.to_path_buf()),
            _ => ExportError::Io(e),
        })?;

    let mut out = BufWriter::new(file);
    if let Err(e) = writer.write_table(table, &mut out) {
        drop(out);
        if let Err(remove_err) = fs::remove_file(path) {
            tracing::warn!("Failed to remove partial export {}: {}", path.display(), remove_err);
        }
        return Err(e);
    }

    tracing::info!("Exported {} rows to {}", table.len(), path.display());
    Ok(())
}
