//! Subject directory discovery.
//!
//! The input tree looks like `root/SUBJECT_DIR/CONDITION_DIR/spreadsheet.csv`.
//! Directory listings are sorted by name so a run visits subjects in the same
//! order every time.

use crate::config::{LayoutConfig, OutputFormat};
use crate::constants::output_extensions;
use crate::error::{Error, Result};
use crate::record::{Condition, Genotype, SubjectMeta};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A subject directory with one directory per condition.
#[derive(Debug, Clone)]
pub struct SubjectDir {
    /// Subject directory.
    pub path: PathBuf,
    /// Identity parsed from the directory name.
    pub meta: SubjectMeta,
    /// High-isoflurane condition directory.
    pub high: PathBuf,
    /// Low-isoflurane condition directory.
    pub low: PathBuf,
}

impl SubjectDir {
    /// Directory holding the spreadsheet of `condition`.
    pub fn condition_dir(&self, condition: Condition) -> &Path {
        match condition {
            Condition::IsoHigh => &self.high,
            Condition::IsoLow => &self.low,
        }
    }

    /// Spreadsheet path of `condition`.
    pub fn spreadsheet(&self, condition: Condition, layout: &LayoutConfig) -> PathBuf {
        self.condition_dir(condition).join(&layout.spreadsheet_name)
    }
}

/// Parse subject identity from a directory name such as `Study_7_x_x_x_x_Tg_M`.
///
/// # Errors
///
/// Returns an error if the name has too few components, the id or gender
/// component is empty, or the genotype is not recognized.
pub fn parse_subject_dir_name(name: &str, layout: &LayoutConfig) -> Result<SubjectMeta> {
    let invalid = |message: String| Error::SubjectDirName {
        name: name.to_string(),
        message,
    };

    let parts: Vec<&str> = name.trim().split(layout.delimiter.as_str()).collect();
    let required = layout.required_components();
    if parts.len() < required {
        return Err(invalid(format!(
            "expected at least {required} '{}'-separated components, found {}",
            layout.delimiter,
            parts.len()
        )));
    }

    let id = parts[layout.id_index].trim();
    if id.is_empty() {
        return Err(invalid(format!("component {} (id) is empty", layout.id_index)));
    }

    let gender = parts[layout.gender_index].trim();
    if gender.is_empty() {
        return Err(invalid(format!(
            "component {} (gender) is empty",
            layout.gender_index
        )));
    }

    let genotype = parts[layout.genotype_index]
        .parse::<Genotype>()
        .map_err(|e| invalid(e.to_string()))?;

    Ok(SubjectMeta {
        id: id.to_string(),
        genotype,
        gender: gender.to_string(),
    })
}

/// Collect subject directories under `root`, sorted by name.
///
/// Files and hidden entries are skipped.
///
/// # Errors
///
/// Returns an error if `root` is not a directory, a subject directory name
/// does not match the layout, or a subject does not have exactly one
/// directory per condition.
pub fn collect_subject_dirs(root: &Path, layout: &LayoutConfig) -> Result<Vec<SubjectDir>> {
    collect_subject_dirs_excluding(root, layout, &[])
}

/// Collect subject directories like [`collect_subject_dirs`], skipping any
/// directory that resolves to one of `excluded`.
///
/// Output and chart directories placed inside `root` are passed here so a
/// rerun does not mistake them for subjects. Excluded paths that do not
/// exist yet are ignored.
///
/// # Errors
///
/// Same as [`collect_subject_dirs`].
pub fn collect_subject_dirs_excluding(
    root: &Path,
    layout: &LayoutConfig,
    excluded: &[&Path],
) -> Result<Vec<SubjectDir>> {
    if !root.is_dir() {
        return Err(Error::InputRootNotFound {
            path: root.to_path_buf(),
        });
    }

    let excluded: Vec<PathBuf> = excluded
        .iter()
        .filter_map(|path| path.canonicalize().ok())
        .collect();

    let mut subjects = Vec::new();

    for path in sorted_subdirs(root)? {
        if path
            .canonicalize()
            .is_ok_and(|resolved| excluded.contains(&resolved))
        {
            debug!("Skipping output directory: {}", path.display());
            continue;
        }

        let name = dir_name(&path);
        let meta = parse_subject_dir_name(&name, layout)?;
        let (high, low) = condition_dirs(&path, &meta, layout)?;
        debug!(
            "Found subject {} ({}, {}) in {}",
            meta.id,
            meta.genotype,
            meta.gender,
            path.display()
        );
        subjects.push(SubjectDir {
            path,
            meta,
            high,
            low,
        });
    }

    Ok(subjects)
}

/// Find the single directory of each condition inside a subject directory.
fn condition_dirs(
    subject_dir: &Path,
    meta: &SubjectMeta,
    layout: &LayoutConfig,
) -> Result<(PathBuf, PathBuf)> {
    let mut high = None;
    let mut low = None;

    for path in sorted_subdirs(subject_dir)? {
        let condition = Condition::from_dir_name(&dir_name(&path), &layout.condition_marker);
        let slot = match condition {
            Condition::IsoHigh => &mut high,
            Condition::IsoLow => &mut low,
        };
        if slot.is_some() {
            return Err(Error::DuplicateCondition {
                subject: meta.id.clone(),
                condition,
                path: subject_dir.to_path_buf(),
            });
        }
        *slot = Some(path);
    }

    let missing = |condition| Error::MissingCondition {
        subject: meta.id.clone(),
        condition,
        path: subject_dir.to_path_buf(),
    };

    Ok((
        high.ok_or_else(|| missing(Condition::IsoHigh))?,
        low.ok_or_else(|| missing(Condition::IsoLow))?,
    ))
}

/// Non-hidden subdirectories of `dir`, sorted by name.
fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            debug!("Skipping non-directory: {}", path.display());
            continue;
        }
        if dir_name(&path).starts_with('.') {
            debug!("Skipping hidden directory: {}", path.display());
            continue;
        }
        dirs.push(path);
    }

    dirs.sort();
    Ok(dirs)
}

/// File name of a directory, lossily decoded.
fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Get the merged table path for a given format.
pub fn output_path_for(output_dir: &Path, table_name: &str, format: OutputFormat) -> PathBuf {
    let extension = match format {
        OutputFormat::Csv => output_extensions::CSV,
        OutputFormat::Json => output_extensions::JSON,
    };

    output_dir.join(format!("{table_name}.{extension}"))
}

/// Determine the chart directory.
pub fn chart_dir_for(output_dir: &Path, explicit_chart_dir: Option<&Path>) -> PathBuf {
    explicit_chart_dir.map_or_else(
        || output_dir.join(crate::constants::output::CHART_DIR),
        Path::to_path_buf,
    )
}
