//! Wide-table spreadsheet parsing.
//!
//! Each condition directory holds a two-row spreadsheet: the first row names
//! the columns and the second row carries the values. From column 2 onward
//! the columns come in groups of three (concentration, %SD, ratio to
//! Cr+PCr), one group per metabolite, and the first header of each group is
//! the metabolite name.

use std::path::Path;

use csv::StringRecord;
use tracing::debug;

use crate::constants::{FIRST_METABOLITE_COLUMN, METABOLITE_GROUP_WIDTH};
use crate::error::{Error, Result};
use crate::record::{Condition, Metabolite, MetaboliteReading, Record, SubjectMeta};

/// Read one condition's spreadsheet into a [`Record`].
///
/// A trailing group with no name and no data (left behind by spreadsheet
/// exports padding the header row) is skipped.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or read
/// - The header or data row is missing
/// - A named group is cut short by the data row
/// - A group carries data but has no name
/// - A value cannot be parsed
/// - No metabolite columns are present
pub fn read_record(path: &Path, subject: &SubjectMeta, condition: Condition) -> Result<Record> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::SpreadsheetRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut rows = reader.records();
    let header = next_row(&mut rows, path, "header")?;
    let data = next_row(&mut rows, path, "data")?;

    let extra = rows.count();
    if extra > 0 {
        debug!("Ignoring {extra} row(s) after the data row in {}", path.display());
    }

    let metabolites = parse_metabolites(&header, &data, path)?;
    debug!(
        "Read {} metabolite(s) for subject {} ({condition}) from {}",
        metabolites.len(),
        subject.id,
        path.display()
    );

    Record::new(subject.clone(), condition, metabolites)
}

fn next_row(
    rows: &mut csv::StringRecordsIter<'_, std::fs::File>,
    path: &Path,
    what: &str,
) -> Result<StringRecord> {
    rows.next()
        .transpose()
        .map_err(|e| Error::SpreadsheetRead {
            path: path.to_path_buf(),
            source: e,
        })?
        .ok_or_else(|| format_error(path, format!("missing {what} row")))
}

/// Split the header/data pair into metabolite readings.
fn parse_metabolites(
    header: &StringRecord,
    data: &StringRecord,
    path: &Path,
) -> Result<Vec<Metabolite>> {
    if data.len() > header.len() {
        debug!(
            "Data row of {} has {} field(s) beyond the header",
            path.display(),
            data.len() - header.len()
        );
    }

    let mut metabolites = Vec::new();

    for start in (FIRST_METABOLITE_COLUMN..header.len()).step_by(METABOLITE_GROUP_WIDTH) {
        let end = start + METABOLITE_GROUP_WIDTH;
        let name = header.get(start).unwrap_or_default().trim();

        if name.is_empty() {
            let blank = (start..end).all(|c| data.get(c).is_none_or(|v| v.trim().is_empty()));
            if blank {
                continue;
            }
            return Err(format_error(
                path,
                format!("column {start} has data but no metabolite name"),
            ));
        }

        if data.len() < end {
            return Err(format_error(
                path,
                format!(
                    "metabolite '{name}' needs columns {start}-{} but the data row has {} field(s)",
                    end - 1,
                    data.len()
                ),
            ));
        }

        metabolites.push(Metabolite {
            name: name.to_string(),
            reading: MetaboliteReading {
                concentration: parse_decimal(data, start, path, "concentration")?,
                sd_percent: parse_integer(data, start + 1, path)?,
                ratio: parse_decimal(data, start + 2, path, "ratio")?,
            },
        });
    }

    if metabolites.is_empty() {
        return Err(format_error(path, "no metabolite columns found".to_string()));
    }

    Ok(metabolites)
}

fn parse_decimal(row: &StringRecord, column: usize, path: &Path, kind: &'static str) -> Result<f64> {
    let raw = row.get(column).unwrap_or_default().trim();
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid_number(path, column, raw, kind))
}

fn parse_integer(row: &StringRecord, column: usize, path: &Path) -> Result<u32> {
    let raw = row.get(column).unwrap_or_default().trim();
    raw.parse::<u32>()
        .map_err(|_| invalid_number(path, column, raw, "%SD"))
}

fn invalid_number(path: &Path, column: usize, raw: &str, kind: &'static str) -> Error {
    Error::InvalidNumber {
        path: path.to_path_buf(),
        column,
        value: raw.to_string(),
        kind,
    }
}

fn format_error(path: &Path, message: String) -> Error {
    Error::SpreadsheetFormat {
        path: path.to_path_buf(),
        message,
    }
}
