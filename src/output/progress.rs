//! Progress bar utilities for subject processing.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for reading subject directories.
pub fn create_subject_progress(total_subjects: usize, enabled: bool) -> Option<ProgressBar> {
    if !enabled || total_subjects == 0 {
        return None;
    }

    let pb = ProgressBar::new(total_subjects as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} subjects {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ "),
    );
    Some(pb)
}

/// Create a progress bar for rendering charts.
pub fn create_chart_progress(total_charts: usize, enabled: bool) -> Option<ProgressBar> {
    if !enabled || total_charts == 0 {
        return None;
    }

    let pb = ProgressBar::new(total_charts as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.green/blue} {pos}/{len} charts {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ "),
    );
    Some(pb)
}

/// Set the message shown next to a progress bar.
pub fn set_message(pb: Option<&ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.set_message(message.to_string());
    }
}

/// Finish a progress bar with a message.
pub fn finish_progress(pb: Option<ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(message.to_string());
    }
}

/// Increment a progress bar.
pub fn inc_progress(pb: Option<&ProgressBar>) {
    if let Some(pb) = pb {
        pb.inc(1);
    }
}
