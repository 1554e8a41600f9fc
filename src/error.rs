//! Error types for mrs-merge.

use std::path::PathBuf;

use crate::record::{Condition, Genotype};

/// Result type alias for mrs-merge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for mrs-merge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Input root directory does not exist or is not a directory.
    #[error("input root is not a readable directory: {path}")]
    InputRootNotFound {
        /// Configured input root.
        path: PathBuf,
    },

    /// Subject directory name does not match the configured layout.
    #[error("subject directory '{name}' does not match the expected layout: {message}")]
    SubjectDirName {
        /// Directory name.
        name: String,
        /// Description of the mismatch.
        message: String,
    },

    /// Genotype label is not one of the recognized categories.
    #[error("unknown genotype '{value}' (expected one of nTg, Tg, TgAD)")]
    UnknownGenotype {
        /// Raw label.
        value: String,
    },

    /// Subject has no directory for one of the conditions.
    #[error("subject '{subject}' has no {condition} directory in '{path}'")]
    MissingCondition {
        /// Subject id.
        subject: String,
        /// Missing condition.
        condition: Condition,
        /// Subject directory.
        path: PathBuf,
    },

    /// Subject has more than one directory for a condition.
    #[error("subject '{subject}' has more than one {condition} directory in '{path}'")]
    DuplicateCondition {
        /// Subject id.
        subject: String,
        /// Duplicated condition.
        condition: Condition,
        /// Subject directory.
        path: PathBuf,
    },

    /// Failed to open or read a spreadsheet.
    #[error("failed to read spreadsheet '{path}'")]
    SpreadsheetRead {
        /// Path to the spreadsheet.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Spreadsheet does not have the expected wide-table shape.
    #[error("invalid spreadsheet '{path}': {message}")]
    SpreadsheetFormat {
        /// Path to the spreadsheet.
        path: PathBuf,
        /// Description of the format error.
        message: String,
    },

    /// Numeric field could not be parsed.
    #[error("invalid {kind} '{value}' in column {column} of '{path}'")]
    InvalidNumber {
        /// Path to the spreadsheet.
        path: PathBuf,
        /// Zero-based column index.
        column: usize,
        /// Raw field value.
        value: String,
        /// Expected kind of number.
        kind: &'static str,
    },

    /// Metabolite appears more than once in a record.
    #[error("metabolite '{metabolite}' appears more than once for subject '{subject}' ({condition})")]
    DuplicateMetabolite {
        /// Subject id.
        subject: String,
        /// Condition of the record.
        condition: Condition,
        /// Duplicated metabolite.
        metabolite: String,
    },

    /// The two condition lists have different lengths.
    #[error("condition lists differ in length: {first} vs {second} subjects")]
    ConditionListLength {
        /// Length of the first list.
        first: usize,
        /// Length of the second list.
        second: usize,
    },

    /// A condition list holds records of an unexpected condition.
    #[error("subject '{subject}' is {found} but its list holds {expected} records")]
    MixedConditions {
        /// Subject id of the offending record.
        subject: String,
        /// Condition the list was expected to hold.
        expected: Condition,
        /// Condition of the offending record.
        found: Condition,
    },

    /// Subject appears more than once in a condition list.
    #[error("subject '{subject}' appears more than once under {condition}")]
    DuplicateSubject {
        /// Subject id.
        subject: String,
        /// Condition list.
        condition: Condition,
    },

    /// Subject has no counterpart in the other condition list.
    #[error("subject '{subject}' has no {condition} record")]
    UnpairedSubject {
        /// Subject id.
        subject: String,
        /// Condition whose record is missing.
        condition: Condition,
    },

    /// Paired records disagree on identity fields.
    #[error(
        "subject '{subject}' has inconsistent metadata: {first_genotype}/{first_gender} vs {second_genotype}/{second_gender}"
    )]
    SubjectMismatch {
        /// Subject id.
        subject: String,
        /// Genotype in the first list.
        first_genotype: Genotype,
        /// Gender in the first list.
        first_gender: String,
        /// Genotype in the second list.
        second_genotype: Genotype,
        /// Gender in the second list.
        second_gender: String,
    },

    /// Record lacks a metabolite present in the reference record.
    #[error("subject '{subject}' has no '{metabolite}' reading under {condition}")]
    MissingMetabolite {
        /// Subject id.
        subject: String,
        /// Condition of the record.
        condition: Condition,
        /// Missing metabolite.
        metabolite: String,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or start an output file.
    #[error("failed to create output file '{path}'")]
    OutputFileCreate {
        /// Path to the output file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the merged table as CSV.
    #[error("failed to write table '{path}'")]
    TableWrite {
        /// Path to the table file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to write JSON output file.
    #[error("failed to write JSON output file '{path}'")]
    JsonWrite {
        /// Path to the JSON file.
        path: PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Chart could not be drawn.
    #[error("failed to render chart '{path}': {reason}")]
    ChartRender {
        /// Path to the chart image.
        path: PathBuf,
        /// Description of the drawing failure.
        reason: String,
    },
}
