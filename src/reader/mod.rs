//! Spectroscopy spreadsheet reading.

mod spreadsheet;

pub use spreadsheet::read_record;
