//! Merge run pipeline components.

mod coordinator;
mod processor;

pub use coordinator::{
    SubjectDir, chart_dir_for, collect_subject_dirs, collect_subject_dirs_excluding, output_path_for,
    parse_subject_dir_name,
};
pub use processor::{RunOptions, RunOutcome, RunSummary, read_subjects, render_charts, run_pipeline};
