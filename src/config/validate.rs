//! Configuration validation.

use crate::config::{ChartConfig, Config, LayoutConfig, OutputConfig};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_layout(&config.layout)?;
    validate_output(&config.output)?;
    validate_chart(&config.chart)?;
    Ok(())
}

fn invalid(message: impl Into<String>) -> Error {
    Error::ConfigValidation {
        message: message.into(),
    }
}

/// Validate the directory layout.
pub fn validate_layout(layout: &LayoutConfig) -> Result<()> {
    if layout.delimiter.is_empty() {
        return Err(invalid("layout.delimiter must not be empty"));
    }

    if layout.condition_marker.is_empty() {
        return Err(invalid("layout.condition_marker must not be empty"));
    }

    if layout.spreadsheet_name.trim().is_empty() {
        return Err(invalid("layout.spreadsheet_name must not be empty"));
    }

    let indices = [
        ("id_index", layout.id_index),
        ("genotype_index", layout.genotype_index),
        ("gender_index", layout.gender_index),
    ];
    for (i, (name, index)) in indices.iter().enumerate() {
        if let Some((other, _)) = indices[i + 1..].iter().find(|(_, o)| o == index) {
            return Err(invalid(format!(
                "layout.{name} and layout.{other} both point at component {index}"
            )));
        }
    }

    Ok(())
}

/// Validate output settings.
fn validate_output(output: &OutputConfig) -> Result<()> {
    if output.table_name.trim().is_empty() {
        return Err(invalid("output.table_name must not be empty"));
    }

    if !output.delimiter.is_ascii() || matches!(output.delimiter, '"' | '\n' | '\r') {
        return Err(invalid(format!(
            "output.delimiter must be a single ASCII character other than a quote or line break, got {:?}",
            output.delimiter
        )));
    }

    if output.formats.is_empty() {
        return Err(invalid("output.formats must list at least one format"));
    }

    Ok(())
}

/// Validate chart styling.
fn validate_chart(chart: &ChartConfig) -> Result<()> {
    let sizes = [
        ("width", chart.width),
        ("height", chart.height),
        ("caption_font_size", chart.caption_font_size),
        ("label_font_size", chart.label_font_size),
        ("point_radius", chart.point_radius),
        ("box_width", chart.box_width),
    ];

    if let Some((name, _)) = sizes.iter().find(|(_, value)| *value == 0) {
        return Err(invalid(format!("chart.{name} must be at least 1")));
    }

    Ok(())
}
