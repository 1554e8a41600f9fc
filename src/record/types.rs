//! Record type definitions.

use crate::error::{Error, Result};
use std::fmt;

/// Isoflurane condition under which a spectrum was acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// High isoflurane level.
    IsoHigh,
    /// Low isoflurane level.
    IsoLow,
}

impl Condition {
    /// Both conditions, in column order.
    pub const ALL: [Self; 2] = [Self::IsoHigh, Self::IsoLow];

    /// Label used in column names and file names.
    pub const fn label(self) -> &'static str {
        match self {
            Self::IsoHigh => "iso_high",
            Self::IsoLow => "iso_low",
        }
    }

    /// The other condition.
    pub const fn other(self) -> Self {
        match self {
            Self::IsoHigh => Self::IsoLow,
            Self::IsoLow => Self::IsoHigh,
        }
    }

    /// Classify a condition directory by whether its name contains `marker`.
    pub fn from_dir_name(name: &str, marker: &str) -> Self {
        if name.contains(marker) {
            Self::IsoHigh
        } else {
            Self::IsoLow
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Genetic group of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Genotype {
    /// Non-transgenic control.
    NonTransgenic,
    /// Transgenic.
    Transgenic,
    /// Transgenic Alzheimer's model.
    TransgenicAd,
}

impl Genotype {
    /// All genotypes, in chart display order.
    pub const ALL: [Self; 3] = [Self::NonTransgenic, Self::Transgenic, Self::TransgenicAd];

    /// Canonical label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::NonTransgenic => "nTg",
            Self::Transgenic => "Tg",
            Self::TransgenicAd => "TgAD",
        }
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Genotype {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownGenotype {
                value: trimmed.to_string(),
            })
    }
}

/// Identity of a subject, taken from its directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectMeta {
    /// Subject id.
    pub id: String,
    /// Genetic group.
    pub genotype: Genotype,
    /// Gender label.
    pub gender: String,
}

/// One metabolite measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetaboliteReading {
    /// Fitted concentration.
    pub concentration: f64,
    /// Cramér-Rao lower bound as percent standard deviation.
    pub sd_percent: u32,
    /// Concentration relative to Cr+PCr.
    pub ratio: f64,
}

/// A named metabolite reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Metabolite {
    /// Metabolite name, trimmed.
    pub name: String,
    /// Measured values.
    pub reading: MetaboliteReading,
}

/// One subject's readings under one condition.
///
/// Metabolites keep the order in which they appear in the spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    subject: SubjectMeta,
    condition: Condition,
    metabolites: Vec<Metabolite>,
}

impl Record {
    /// Build a record, rejecting duplicate metabolite names.
    pub fn new(
        subject: SubjectMeta,
        condition: Condition,
        metabolites: Vec<Metabolite>,
    ) -> Result<Self> {
        for (i, m) in metabolites.iter().enumerate() {
            if metabolites[..i].iter().any(|prev| prev.name == m.name) {
                return Err(Error::DuplicateMetabolite {
                    subject: subject.id,
                    condition,
                    metabolite: m.name.clone(),
                });
            }
        }

        Ok(Self {
            subject,
            condition,
            metabolites,
        })
    }

    /// Subject identity.
    pub fn subject(&self) -> &SubjectMeta {
        &self.subject
    }

    /// Subject id.
    pub fn id(&self) -> &str {
        &self.subject.id
    }

    /// Condition of this record.
    pub fn condition(&self) -> Condition {
        self.condition
    }

    /// Metabolites in spreadsheet order.
    pub fn metabolites(&self) -> &[Metabolite] {
        &self.metabolites
    }

    /// Metabolite names in spreadsheet order.
    pub fn metabolite_names(&self) -> impl Iterator<Item = &str> {
        self.metabolites.iter().map(|m| m.name.as_str())
    }

    /// Look up a reading by metabolite name.
    pub fn reading(&self, name: &str) -> Option<&MetaboliteReading> {
        self.metabolites
            .iter()
            .find(|m| m.name == name)
            .map(|m| &m.reading)
    }
}
