//! Flattened per-subject table.
//!
//! Column naming is fixed: `"{metabolite} {condition}"` for the
//! concentration, `"{metabolite} %SD {condition}"` for the standard
//! deviation and `"{metabolite} /Cr+PCr {condition}"` for the ratio. Every
//! sub-field is emitted for both conditions before moving to the next one.

use std::fmt;

use tracing::{debug, warn};

use crate::constants::{COLUMN_SEPARATOR, IDENTITY_COLUMNS};
use crate::error::{Error, Result};
use crate::merge::{RecordPair, pair_records};
use crate::record::{Condition, Genotype, MetaboliteReading, Record};

/// Sub-field of a metabolite reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Fitted concentration.
    Concentration,
    /// Percent standard deviation.
    SdPercent,
    /// Ratio to Cr+PCr.
    Ratio,
}

impl Field {
    /// All sub-fields, in column order.
    pub const ALL: [Self; 3] = [Self::Concentration, Self::SdPercent, Self::Ratio];

    const fn qualifier(self) -> Option<&'static str> {
        match self {
            Self::Concentration => None,
            Self::SdPercent => Some("%SD"),
            Self::Ratio => Some("/Cr+PCr"),
        }
    }

    fn value(self, reading: &MetaboliteReading) -> CellValue {
        match self {
            Self::Concentration => CellValue::Decimal(reading.concentration),
            Self::SdPercent => CellValue::Integer(reading.sd_percent),
            Self::Ratio => CellValue::Decimal(reading.ratio),
        }
    }
}

/// Name of the column holding `field` of `metabolite` under `condition`.
pub fn column_name(metabolite: &str, field: Field, condition: Condition) -> String {
    match field.qualifier() {
        Some(qualifier) => format!("{metabolite} {qualifier}{COLUMN_SEPARATOR}{condition}"),
        None => format!("{metabolite}{COLUMN_SEPARATOR}{condition}"),
    }
}

/// A measured value in the merged table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue {
    /// Decimal value.
    Decimal(f64),
    /// Integer value.
    Integer(u32),
}

impl CellValue {
    /// Numeric value as `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Decimal(v) => v,
            Self::Integer(v) => f64::from(v),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Debug keeps the shortest round-trip form and the trailing ".0".
            Self::Decimal(v) => write!(f, "{v:?}"),
            Self::Integer(v) => write!(f, "{v}"),
        }
    }
}

/// One subject's row.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    /// Subject id.
    pub id: String,
    /// Genetic group.
    pub genotype: Genotype,
    /// Gender label.
    pub gender: String,
    /// Six values per metabolite, in column order.
    pub values: Vec<CellValue>,
}

impl MergedRow {
    /// All fields rendered as text, identity fields first.
    pub fn fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(IDENTITY_COLUMNS.len() + self.values.len());
        fields.push(self.id.clone());
        fields.push(self.genotype.to_string());
        fields.push(self.gender.clone());
        fields.extend(self.values.iter().map(ToString::to_string));
        fields
    }
}

/// Concentration of one subject under one condition, for charting.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcentrationPoint {
    /// Subject id.
    pub subject: String,
    /// Genetic group.
    pub genotype: Genotype,
    /// Condition.
    pub condition: Condition,
    /// Concentration.
    pub value: f64,
}

/// Both conditions of every subject, flattened to one row per subject.
#[derive(Debug, Clone)]
pub struct MergedTable {
    conditions: [Condition; 2],
    metabolites: Vec<String>,
    columns: Vec<String>,
    rows: Vec<MergedRow>,
}

impl MergedTable {
    /// Column conditions, in pair order.
    pub fn conditions(&self) -> [Condition; 2] {
        self.conditions
    }

    /// Metabolite names, in column order.
    pub fn metabolites(&self) -> &[String] {
        &self.metabolites
    }

    /// Full header, identity columns first.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, one per subject.
    pub fn rows(&self) -> &[MergedRow] {
        &self.rows
    }

    /// Concentrations of `metabolite` for every subject and condition.
    ///
    /// Returns an empty list for a metabolite not in the table.
    pub fn concentrations(&self, metabolite: &str) -> Vec<ConcentrationPoint> {
        let Some(index) = self.metabolites.iter().position(|m| m == metabolite) else {
            return Vec::new();
        };
        let base = index * values_per_metabolite();

        self.rows
            .iter()
            .flat_map(|row| {
                self.conditions
                    .iter()
                    .enumerate()
                    .filter_map(move |(offset, &condition)| {
                        row.values.get(base + offset).map(|v| ConcentrationPoint {
                            subject: row.id.clone(),
                            genotype: row.genotype,
                            condition,
                            value: v.as_f64(),
                        })
                    })
            })
            .collect()
    }
}

const fn values_per_metabolite() -> usize {
    Field::ALL.len() * Condition::ALL.len()
}

/// Merge the two condition lists into a table.
///
/// Metabolite columns come from the first record of `first`. Returns
/// `Ok(None)` without building anything when either list is empty.
///
/// # Errors
///
/// Returns an error if the lists cannot be paired (see
/// [`pair_records`](crate::merge::pair_records)) or a record lacks one of the
/// reference metabolites.
pub fn build_table(first: &[Record], second: &[Record]) -> Result<Option<MergedTable>> {
    let Some(reference) = first.first().filter(|_| !second.is_empty()) else {
        warn!(
            "No subject data available ({} and {} record(s))",
            first.len(),
            second.len()
        );
        return Ok(None);
    };

    let pairs = pair_records(first, second)?;

    let conditions = [reference.condition(), reference.condition().other()];
    let metabolites: Vec<String> = reference.metabolite_names().map(str::to_string).collect();
    let columns = header(&metabolites, conditions);

    let rows = pairs
        .iter()
        .map(|pair| merge_pair(pair, &metabolites))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Merged {} subject(s) across {} metabolite(s) into {} column(s)",
        rows.len(),
        metabolites.len(),
        columns.len()
    );

    Ok(Some(MergedTable {
        conditions,
        metabolites,
        columns,
        rows,
    }))
}

fn header(metabolites: &[String], conditions: [Condition; 2]) -> Vec<String> {
    let mut columns: Vec<String> = IDENTITY_COLUMNS.iter().map(ToString::to_string).collect();
    for metabolite in metabolites {
        for field in Field::ALL {
            for condition in conditions {
                columns.push(column_name(metabolite, field, condition));
            }
        }
    }
    columns
}

fn merge_pair(pair: &RecordPair<'_>, metabolites: &[String]) -> Result<MergedRow> {
    let mut values = Vec::with_capacity(metabolites.len() * values_per_metabolite());

    for metabolite in metabolites {
        let first = required_reading(pair.first, metabolite)?;
        let second = required_reading(pair.second, metabolite)?;
        for field in Field::ALL {
            values.push(field.value(first));
            values.push(field.value(second));
        }
    }

    for record in [pair.first, pair.second] {
        for name in record.metabolite_names() {
            if !metabolites.iter().any(|m| m == name) {
                debug!(
                    "Ignoring metabolite '{name}' of subject {} ({}): not in the reference record",
                    record.id(),
                    record.condition()
                );
            }
        }
    }

    let subject = pair.first.subject();
    Ok(MergedRow {
        id: subject.id.clone(),
        genotype: subject.genotype,
        gender: subject.gender.clone(),
        values,
    })
}

fn required_reading<'a>(record: &'a Record, metabolite: &str) -> Result<&'a MetaboliteReading> {
    record
        .reading(metabolite)
        .ok_or_else(|| Error::MissingMetabolite {
            subject: record.id().to_string(),
            condition: record.condition(),
            metabolite: metabolite.to_string(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::record::{Metabolite, SubjectMeta};

    fn record(id: &str, condition: Condition, readings: &[(&str, f64, u32, f64)]) -> Record {
        Record::new(
            SubjectMeta {
                id: id.to_string(),
                genotype: Genotype::Transgenic,
                gender: "M".to_string(),
            },
            condition,
            readings
                .iter()
                .map(|&(name, concentration, sd_percent, ratio)| Metabolite {
                    name: name.to_string(),
                    reading: MetaboliteReading {
                        concentration,
                        sd_percent,
                        ratio,
                    },
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_column_name_scheme() {
        assert_eq!(
            column_name("Cr", Field::Concentration, Condition::IsoHigh),
            "Cr iso_high"
        );
        assert_eq!(
            column_name("Cr", Field::SdPercent, Condition::IsoLow),
            "Cr %SD iso_low"
        );
        assert_eq!(
            column_name("NAA", Field::Ratio, Condition::IsoHigh),
            "NAA /Cr+PCr iso_high"
        );
    }

    #[test]
    fn test_cell_value_display_keeps_decimal_form() {
        assert_eq!(CellValue::Decimal(8.2).to_string(), "8.2");
        assert_eq!(CellValue::Decimal(1.0).to_string(), "1.0");
        assert_eq!(CellValue::Decimal(0.123_456_789).to_string(), "0.123456789");
        assert_eq!(CellValue::Integer(5).to_string(), "5");
    }

    #[test]
    fn test_single_subject_row() {
        let high = vec![record(
            "7",
            Condition::IsoHigh,
            &[("Cr", 8.2, 5, 1.0), ("NAA", 9.4, 4, 1.1)],
        )];
        let low = vec![record(
            "7",
            Condition::IsoLow,
            &[("Cr", 7.9, 6, 1.0), ("NAA", 9.0, 3, 1.14)],
        )];

        let table = build_table(&high, &low).unwrap().unwrap();

        assert_eq!(table.columns().len(), 3 + 6 * 2);
        assert_eq!(
            &table.columns()[..9],
            [
                "Id",
                "Genotype",
                "Gender",
                "Cr iso_high",
                "Cr iso_low",
                "Cr %SD iso_high",
                "Cr %SD iso_low",
                "Cr /Cr+PCr iso_high",
                "Cr /Cr+PCr iso_low",
            ]
        );
        assert_eq!(table.rows().len(), 1);
        assert_eq!(
            table.rows()[0].fields(),
            [
                "7", "Tg", "M", "8.2", "7.9", "5", "6", "1.0", "1.0", "9.4", "9.0", "4", "3",
                "1.1", "1.14",
            ]
        );
    }

    #[test]
    fn test_low_first_puts_low_columns_first() {
        let high = vec![record("1", Condition::IsoHigh, &[("Cr", 8.0, 5, 1.0)])];
        let low = vec![record("1", Condition::IsoLow, &[("Cr", 7.0, 5, 1.0)])];

        let table = build_table(&low, &high).unwrap().unwrap();

        assert_eq!(table.conditions(), [Condition::IsoLow, Condition::IsoHigh]);
        assert_eq!(table.columns()[3], "Cr iso_low");
        assert_eq!(table.rows()[0].values[0], CellValue::Decimal(7.0));
    }

    #[test]
    fn test_empty_list_is_no_data() {
        let high = vec![record("1", Condition::IsoHigh, &[("Cr", 8.0, 5, 1.0)])];

        assert!(build_table(&high, &[]).unwrap().is_none());
        assert!(build_table(&[], &high).unwrap().is_none());
    }

    #[test]
    fn test_missing_metabolite_is_error() {
        let high = vec![record(
            "1",
            Condition::IsoHigh,
            &[("Cr", 8.0, 5, 1.0), ("NAA", 9.0, 4, 1.1)],
        )];
        let low = vec![record("1", Condition::IsoLow, &[("Cr", 7.0, 5, 1.0)])];

        let result = build_table(&high, &low);
        assert!(matches!(result, Err(Error::MissingMetabolite { .. })));
    }

    #[test]
    fn test_extra_metabolite_is_ignored() {
        let high = vec![record("1", Condition::IsoHigh, &[("Cr", 8.0, 5, 1.0)])];
        let low = vec![record(
            "1",
            Condition::IsoLow,
            &[("Glu", 10.0, 7, 1.3), ("Cr", 7.0, 5, 1.0)],
        )];

        let table = build_table(&high, &low).unwrap().unwrap();
        assert_eq!(table.metabolites(), ["Cr"]);
        assert_eq!(table.rows()[0].values.len(), 6);
        assert_eq!(table.rows()[0].values[1], CellValue::Decimal(7.0));
    }

    #[test]
    fn test_concentrations_for_chart() {
        let high = vec![
            record("1", Condition::IsoHigh, &[("Cr", 8.0, 5, 1.0), ("NAA", 9.0, 4, 1.1)]),
            record("2", Condition::IsoHigh, &[("Cr", 8.5, 5, 1.0), ("NAA", 9.5, 4, 1.1)]),
        ];
        let low = vec![
            record("1", Condition::IsoLow, &[("Cr", 7.0, 5, 1.0), ("NAA", 8.0, 4, 1.1)]),
            record("2", Condition::IsoLow, &[("Cr", 7.5, 5, 1.0), ("NAA", 8.5, 4, 1.1)]),
        ];

        let table = build_table(&high, &low).unwrap().unwrap();
        let points = table.concentrations("NAA");

        assert_eq!(points.len(), 4);
        assert_eq!(points[0].subject, "1");
        assert_eq!(points[0].condition, Condition::IsoHigh);
        assert_eq!(points[0].value, 9.0);
        assert_eq!(points[1].condition, Condition::IsoLow);
        assert_eq!(points[1].value, 8.0);
        assert_eq!(points[3].value, 8.5);
        assert!(table.concentrations("GABA").is_empty());
    }
}
