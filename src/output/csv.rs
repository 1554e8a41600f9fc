//! Delimited text output writer.

use crate::constants::output::UTF8_BOM;
use crate::error::{Error, Result};
use crate::merge::MergedRow;
use crate::output::TableWriter;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Delimited text table writer.
pub struct CsvTableWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl CsvTableWriter {
    /// Create a new writer.
    ///
    /// # Arguments
    ///
    /// * `path` - Output file path
    /// * `delimiter` - Field delimiter byte
    /// * `include_bom` - Whether to start the file with a UTF-8 BOM for Excel
    pub fn new(path: &Path, delimiter: u8, include_bom: bool) -> Result<Self> {
        let create_error = |source| Error::OutputFileCreate {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::create(path).map_err(create_error)?;
        if include_bom {
            file.write_all(UTF8_BOM).map_err(create_error)?;
        }

        let writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(file);

        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    fn write_error(&self, source: csv::Error) -> Error {
        Error::TableWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl TableWriter for CsvTableWriter {
    fn write_header(&mut self, columns: &[String]) -> Result<()> {
        self.writer
            .write_record(columns)
            .map_err(|e| self.write_error(e))
    }

    fn write_row(&mut self, row: &MergedRow) -> Result<()> {
        self.writer
            .write_record(row.fields())
            .map_err(|e| self.write_error(e))
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| self.write_error(e.into()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::merge::CellValue;
    use crate::record::Genotype;
    use tempfile::NamedTempFile;

    fn row() -> MergedRow {
        MergedRow {
            id: "7".to_string(),
            genotype: Genotype::Transgenic,
            gender: "M".to_string(),
            values: vec![CellValue::Decimal(8.2), CellValue::Decimal(7.9)],
        }
    }

    fn columns() -> Vec<String> {
        ["Id", "Genotype", "Gender", "Cr iso_high", "Cr iso_low"]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_csv_writer_basic() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = CsvTableWriter::new(file.path(), b',', false).unwrap();

        writer.write_header(&columns()).unwrap();
        writer.write_row(&row()).unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            contents,
            "Id,Genotype,Gender,Cr iso_high,Cr iso_low\n7,Tg,M,8.2,7.9\n"
        );
    }

    #[test]
    fn test_csv_writer_custom_delimiter() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = CsvTableWriter::new(file.path(), b'\t', false).unwrap();

        writer.write_header(&columns()).unwrap();
        writer.write_row(&row()).unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert!(contents.starts_with("Id\tGenotype\tGender\t"));
        assert!(contents.ends_with("7\tTg\tM\t8.2\t7.9\n"));
    }

    #[test]
    fn test_csv_writer_bom() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = CsvTableWriter::new(file.path(), b',', true).unwrap();

        writer.write_header(&columns()).unwrap();
        writer.finalize().unwrap();

        let bytes = std::fs::read(file.path()).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        assert_eq!(&bytes[UTF8_BOM.len()..UTF8_BOM.len() + 2], b"Id");
    }

    #[test]
    fn test_csv_writer_quotes_fields_with_delimiter() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = CsvTableWriter::new(file.path(), b',', false).unwrap();

        writer
            .write_header(&["Id".to_string(), "Glu,Gln iso_high".to_string()])
            .unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "Id,\"Glu,Gln iso_high\"\n");
    }

    #[test]
    fn test_csv_writer_create_error_names_path() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("MRS_Data.csv");

        let result = CsvTableWriter::new(&path, b',', false);

        let Err(err) = result else {
            panic!("expected create error");
        };
        assert!(matches!(err, Error::OutputFileCreate { .. }));
        assert!(err.to_string().contains("MRS_Data.csv"));
    }
}
