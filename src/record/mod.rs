//! In-memory model of one subject's readings under one condition.

mod types;

pub use types::{Condition, Genotype, Metabolite, MetaboliteReading, Record, SubjectMeta};
