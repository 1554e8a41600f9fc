//! JSON output format writer.

use crate::error::{Error, Result};
use crate::merge::{CellValue, MergedRow};
use crate::output::TableWriter;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// JSON table file structure.
///
/// Rows are arrays aligned with `columns` so the column order of the
/// delimited table is kept.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonTable {
    /// Column names.
    pub columns: Vec<String>,
    /// One array per subject.
    pub rows: Vec<Vec<Value>>,
}

/// Writer for JSON table output files.
pub struct JsonTableWriter {
    /// Output file path.
    output_path: PathBuf,
    /// Collected table.
    table: JsonTable,
}

impl JsonTableWriter {
    /// Create a new JSON table writer.
    pub fn new(output_path: &Path) -> Self {
        Self {
            output_path: output_path.to_path_buf(),
            table: JsonTable {
                columns: Vec::new(),
                rows: Vec::new(),
            },
        }
    }
}

fn cell_to_json(value: CellValue) -> Value {
    match value {
        CellValue::Decimal(v) => Value::from(v),
        CellValue::Integer(v) => Value::from(v),
    }
}

impl TableWriter for JsonTableWriter {
    fn write_header(&mut self, columns: &[String]) -> Result<()> {
        self.table.columns = columns.to_vec();
        Ok(())
    }

    fn write_row(&mut self, row: &MergedRow) -> Result<()> {
        let mut values = vec![
            Value::from(row.id.as_str()),
            Value::from(row.genotype.label()),
            Value::from(row.gender.as_str()),
        ];
        values.extend(row.values.iter().copied().map(cell_to_json));
        self.table.rows.push(values);
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let file = File::create(&self.output_path).map_err(|e| Error::OutputFileCreate {
            path: self.output_path.clone(),
            source: e,
        })?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.table).map_err(|e| Error::JsonWrite {
            path: self.output_path.clone(),
            source: e,
        })
    }
}
