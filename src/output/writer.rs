//! Table writer trait definition.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::merge::{MergedRow, MergedTable};
use crate::output::{CsvTableWriter, JsonTableWriter};
use std::path::Path;
use tracing::debug;

/// Trait for writing the merged table.
pub trait TableWriter {
    /// Write the column header (if applicable).
    fn write_header(&mut self, columns: &[String]) -> Result<()>;

    /// Write a single subject row.
    fn write_row(&mut self, row: &MergedRow) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}

/// Write the merged table to `path` in one format.
///
/// `delimiter` and `csv_bom` only apply to CSV output.
pub fn write_table(
    table: &MergedTable,
    path: &Path,
    format: OutputFormat,
    delimiter: u8,
    csv_bom: bool,
) -> Result<()> {
    debug!("Writing {} output: {}", format, path.display());

    let mut writer: Box<dyn TableWriter> = match format {
        OutputFormat::Csv => Box::new(CsvTableWriter::new(path, delimiter, csv_bom)?),
        OutputFormat::Json => Box::new(JsonTableWriter::new(path)),
    };

    writer.write_header(table.columns())?;
    for row in table.rows() {
        writer.write_row(row)?;
    }
    writer.finalize()
}
