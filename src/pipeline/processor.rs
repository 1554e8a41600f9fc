//! Merge run pipeline.

use crate::chart::{ChartStyle, render_metabolite_chart};
use crate::config::{LayoutConfig, OutputFormat};
use crate::error::{Error, Result};
use crate::merge::{MergedTable, build_table};
use crate::output::{progress, write_table};
use crate::pipeline::{SubjectDir, collect_subject_dirs_excluding, output_path_for};
use crate::reader::read_record;
use crate::record::{Condition, Record};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Settings for one merge run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Root directory holding one directory per subject.
    pub root: PathBuf,
    /// Directory receiving the merged table.
    pub output_dir: PathBuf,
    /// File stem of the merged table.
    pub table_name: String,
    /// Table formats to write.
    pub formats: Vec<OutputFormat>,
    /// Delimiter of CSV output.
    pub delimiter: u8,
    /// Start CSV output with a UTF-8 BOM.
    pub csv_bom: bool,
    /// Chart directory, or `None` to skip charts.
    pub chart_dir: Option<PathBuf>,
    /// Input directory layout.
    pub layout: LayoutConfig,
    /// Chart styling.
    pub chart_style: ChartStyle,
    /// Show progress bars.
    pub progress: bool,
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of merged subjects.
    pub subjects: usize,
    /// Number of metabolites per subject.
    pub metabolites: usize,
    /// Written table files.
    pub tables: Vec<PathBuf>,
    /// Written chart files.
    pub charts: Vec<PathBuf>,
}

/// Result of a merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Table (and charts) written.
    Completed(RunSummary),
    /// Nothing to merge, no file written.
    NoData,
}

/// Run a full merge: discover subjects, read both conditions, merge, write
/// the table and render charts.
///
/// # Errors
///
/// Returns the first error hit. Files written before the error are left in
/// place.
pub fn run_pipeline(options: &RunOptions) -> Result<RunOutcome> {
    let start_time = Instant::now();

    info!("Scanning subjects in {}", options.root.display());
    let mut excluded = vec![options.output_dir.as_path()];
    excluded.extend(options.chart_dir.as_deref());
    let subjects = collect_subject_dirs_excluding(&options.root, &options.layout, &excluded)?;
    info!("Found {} subject(s)", subjects.len());

    let (high, low) = read_subjects(&subjects, &options.layout, options.progress)?;

    let Some(table) = build_table(&high, &low)? else {
        return Ok(RunOutcome::NoData);
    };

    create_dir(&options.output_dir)?;

    let mut tables = Vec::with_capacity(options.formats.len());
    for format in &options.formats {
        let path = output_path_for(&options.output_dir, &options.table_name, *format);
        write_table(&table, &path, *format, options.delimiter, options.csv_bom)?;
        info!("Wrote {} table: {}", format, path.display());
        tables.push(path);
    }

    let charts = match &options.chart_dir {
        Some(chart_dir) => {
            render_charts(&table, chart_dir, &options.chart_style, options.progress)?
        }
        None => {
            debug!("Chart rendering disabled");
            Vec::new()
        }
    };

    info!(
        "Merged {} subject(s) in {:.2}s",
        table.rows().len(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(RunOutcome::Completed(RunSummary {
        subjects: table.rows().len(),
        metabolites: table.metabolites().len(),
        tables,
        charts,
    }))
}

/// Read the high and low spreadsheets of every subject.
///
/// Returns the high-isoflurane list first.
///
/// # Errors
///
/// Returns an error if any spreadsheet cannot be read or parsed.
pub fn read_subjects(
    subjects: &[SubjectDir],
    layout: &LayoutConfig,
    progress_enabled: bool,
) -> Result<(Vec<Record>, Vec<Record>)> {
    let pb = progress::create_subject_progress(subjects.len(), progress_enabled);

    let mut high = Vec::with_capacity(subjects.len());
    let mut low = Vec::with_capacity(subjects.len());

    for subject in subjects {
        progress::set_message(pb.as_ref(), &subject.meta.id);
        for (condition, records) in [(Condition::IsoHigh, &mut high), (Condition::IsoLow, &mut low)]
        {
            let path = subject.spreadsheet(condition, layout);
            records.push(read_record(&path, &subject.meta, condition)?);
        }
        progress::inc_progress(pb.as_ref());
    }

    progress::finish_progress(pb, "Subjects read");
    Ok((high, low))
}

/// Render one chart per metabolite into `chart_dir`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a chart fails to
/// render.
pub fn render_charts(
    table: &MergedTable,
    chart_dir: &Path,
    style: &ChartStyle,
    progress_enabled: bool,
) -> Result<Vec<PathBuf>> {
    create_dir(chart_dir)?;

    let pb = progress::create_chart_progress(table.metabolites().len(), progress_enabled);
    let mut charts = Vec::with_capacity(table.metabolites().len());

    for metabolite in table.metabolites() {
        progress::set_message(pb.as_ref(), metabolite);
        charts.push(render_metabolite_chart(table, metabolite, chart_dir, style)?);
        progress::inc_progress(pb.as_ref());
    }

    progress::finish_progress(pb, "Charts rendered");
    info!("Rendered {} chart(s) into {}", charts.len(), chart_dir.display());
    Ok(charts)
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::OutputDirCreateFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pipeline::collect_subject_dirs;
    use std::fs;
    use tempfile::TempDir;

    fn write_subject(root: &Path, name: &str, high: &str, low: &str) {
        for (condition, data) in [("iso_high", high), ("iso_low", low)] {
            let dir = root.join(name).join(condition);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("spreadsheet.csv"), format!(",,Cr,,,NAA,,\n{data}\n")).unwrap();
        }
    }

    fn options(root: &Path, output_dir: &Path) -> RunOptions {
        RunOptions {
            root: root.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            table_name: "MRS_Data".to_string(),
            formats: vec![OutputFormat::Csv],
            delimiter: b',',
            csv_bom: false,
            chart_dir: None,
            layout: LayoutConfig::default(),
            chart_style: ChartStyle::default(),
            progress: false,
        }
    }

    #[test]
    fn test_read_subjects_splits_conditions() {
        let input = TempDir::new().unwrap();
        write_subject(
            input.path(),
            "Study_7_x_x_x_x_Tg_M",
            ",,8.2,5,1.0,9.4,4,1.1",
            ",,7.9,6,1.0,9.0,3,1.14",
        );

        let subjects = collect_subject_dirs(input.path(), &LayoutConfig::default()).unwrap();
        let (high, low) = read_subjects(&subjects, &LayoutConfig::default(), false).unwrap();

        assert_eq!(high.len(), 1);
        assert_eq!(low.len(), 1);
        assert_eq!(high[0].condition(), Condition::IsoHigh);
        assert_eq!(low[0].condition(), Condition::IsoLow);
        assert_eq!(high[0].id(), "7");
    }

    #[test]
    fn test_run_pipeline_writes_tables() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_subject(
            input.path(),
            "Study_7_x_x_x_x_Tg_M",
            ",,8.2,5,1.0,9.4,4,1.1",
            ",,7.9,6,1.0,9.0,3,1.14",
        );
        write_subject(
            input.path(),
            "Study_3_x_x_x_x_nTg_F",
            ",,8.0,4,0.9,9.1,5,1.2",
            ",,7.7,5,0.95,8.8,6,1.25",
        );

        let mut opts = options(input.path(), &output.path().join("merged"));
        opts.formats = vec![OutputFormat::Csv, OutputFormat::Json];

        let outcome = run_pipeline(&opts).unwrap();
        let RunOutcome::Completed(summary) = outcome else {
            panic!("expected completed run");
        };

        assert_eq!(summary.subjects, 2);
        assert_eq!(summary.metabolites, 2);
        assert_eq!(summary.tables.len(), 2);
        assert!(summary.charts.is_empty());

        let csv = fs::read_to_string(output.path().join("merged/MRS_Data.csv")).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Id,Genotype,Gender,Cr iso_high,Cr iso_low,"));
        assert!(lines[1].starts_with("3,nTg,F,8.0,7.7,"));
        assert!(lines[2].starts_with("7,Tg,M,8.2,7.9,"));
        assert!(output.path().join("merged/MRS_Data.json").exists());
    }

    #[test]
    fn test_run_pipeline_renders_chart_per_metabolite() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_subject(
            input.path(),
            "Study_7_x_x_x_x_Tg_M",
            ",,8.2,5,1.0,9.4,4,1.1",
            ",,7.9,6,1.0,9.0,3,1.14",
        );
        write_subject(
            input.path(),
            "Study_3_x_x_x_x_nTg_F",
            ",,8.0,4,0.9,9.1,5,1.2",
            ",,7.7,5,0.95,8.8,6,1.25",
        );

        let chart_dir = output.path().join("figures").join("mrs");
        let mut opts = options(input.path(), output.path());
        opts.chart_dir = Some(chart_dir.clone());

        let RunOutcome::Completed(summary) = run_pipeline(&opts).unwrap() else {
            panic!("expected completed run");
        };

        let expected = [
            chart_dir.join("Cr_iso_high_vs_iso_low.png"),
            chart_dir.join("NAA_iso_high_vs_iso_low.png"),
        ];
        assert_eq!(summary.charts, expected);
        for chart in &expected {
            assert!(fs::metadata(chart).unwrap().len() > 0, "{} is empty", chart.display());
        }
    }

    #[test]
    fn test_rerun_with_output_inside_root() {
        let root = TempDir::new().unwrap();
        write_subject(
            root.path(),
            "Study_7_x_x_x_x_Tg_M",
            ",,8.2,5,1.0,9.4,4,1.1",
            ",,7.9,6,1.0,9.0,3,1.14",
        );

        let mut opts = options(root.path(), root.path());
        opts.chart_dir = Some(root.path().join("charts"));

        let first = run_pipeline(&opts).unwrap();
        let first_csv = fs::read(root.path().join("MRS_Data.csv")).unwrap();
        assert!(root.path().join("charts").is_dir());

        let second = run_pipeline(&opts).unwrap();
        assert_eq!(second, first);
        assert_eq!(fs::read(root.path().join("MRS_Data.csv")).unwrap(), first_csv);
    }

    #[test]
    fn test_rerun_with_output_subdir_of_root() {
        let root = TempDir::new().unwrap();
        write_subject(
            root.path(),
            "Study_7_x_x_x_x_Tg_M",
            ",,8.2,5,1.0,9.4,4,1.1",
            ",,7.9,6,1.0,9.0,3,1.14",
        );

        let opts = options(root.path(), &root.path().join("merged"));
        run_pipeline(&opts).unwrap();

        let RunOutcome::Completed(summary) = run_pipeline(&opts).unwrap() else {
            panic!("expected completed run");
        };
        assert_eq!(summary.subjects, 1);
    }

    #[test]
    fn test_run_pipeline_empty_root_is_no_data() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let out_dir = output.path().join("merged");

        let outcome = run_pipeline(&options(input.path(), &out_dir)).unwrap();

        assert_eq!(outcome, RunOutcome::NoData);
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_run_pipeline_bad_spreadsheet_fails() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_subject(
            input.path(),
            "Study_7_x_x_x_x_Tg_M",
            ",,8.2,5,1.0,abc,4,1.1",
            ",,7.9,6,1.0,9.0,3,1.14",
        );

        let result = run_pipeline(&options(input.path(), output.path()));
        assert!(matches!(result, Err(Error::InvalidNumber { .. })));
        assert!(!output.path().join("MRS_Data.csv").exists());
    }
}
