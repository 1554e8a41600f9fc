//! Pairing of condition records and flattening into table rows.

mod pairing;
mod table;

pub use pairing::{RecordPair, pair_records};
pub use table::{
    CellValue, ConcentrationPoint, Field, MergedRow, MergedTable, build_table, column_name,
};
