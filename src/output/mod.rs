//! Output format writers.

mod csv;
mod json;
pub mod progress;
mod writer;

pub use csv::CsvTableWriter;
pub use json::{JsonTable, JsonTableWriter};
pub use writer::{TableWriter, write_table};
