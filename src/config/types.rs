//! Configuration type definitions.

use crate::constants::{chart, layout, output};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input directory layout.
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Chart styling.
    #[serde(default)]
    pub chart: ChartConfig,
}

/// How subject and condition directories are named.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Delimiter splitting subject directory names.
    pub delimiter: String,

    /// Component index of the subject id.
    pub id_index: usize,

    /// Component index of the genotype.
    pub genotype_index: usize,

    /// Component index of the gender.
    pub gender_index: usize,

    /// Substring marking the high-isoflurane condition directory.
    pub condition_marker: String,

    /// Spreadsheet file name inside each condition directory.
    pub spreadsheet_name: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            delimiter: layout::DELIMITER.to_string(),
            id_index: layout::ID_INDEX,
            genotype_index: layout::GENOTYPE_INDEX,
            gender_index: layout::GENDER_INDEX,
            condition_marker: layout::CONDITION_MARKER.to_string(),
            spreadsheet_name: layout::SPREADSHEET_NAME.to_string(),
        }
    }
}

impl LayoutConfig {
    /// Number of components a subject directory name must have.
    pub fn required_components(&self) -> usize {
        self.id_index
            .max(self.genotype_index)
            .max(self.gender_index)
            + 1
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File stem of the merged table.
    pub table_name: String,

    /// Output formats.
    pub formats: Vec<OutputFormat>,

    /// Table field delimiter.
    pub delimiter: char,

    /// Start CSV output with a UTF-8 BOM.
    pub csv_bom: bool,

    /// Render per-metabolite charts.
    pub charts: bool,

    /// Chart directory (default: `charts` inside the output directory).
    pub chart_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            table_name: output::TABLE_NAME.to_string(),
            formats: vec![OutputFormat::Csv],
            delimiter: output::DELIMITER,
            csv_bom: false,
            charts: true,
            chart_dir: None,
        }
    }
}

/// Chart styling settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChartConfig {
    /// Image width in pixels.
    pub width: u32,

    /// Image height in pixels.
    pub height: u32,

    /// Caption font size.
    pub caption_font_size: u32,

    /// Axis label font size.
    pub label_font_size: u32,

    /// Marker radius in pixels.
    pub point_radius: u32,

    /// Box width in pixels.
    pub box_width: u32,

    /// RGB colour of the high-isoflurane series.
    pub high_color: [u8; 3],

    /// RGB colour of the low-isoflurane series.
    pub low_color: [u8; 3],
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: chart::WIDTH,
            height: chart::HEIGHT,
            caption_font_size: chart::CAPTION_FONT_SIZE,
            label_font_size: chart::LABEL_FONT_SIZE,
            point_radius: chart::POINT_RADIUS,
            box_width: chart::BOX_WIDTH,
            high_color: chart::HIGH_COLOR,
            low_color: chart::LOW_COLOR,
        }
    }
}

/// Supported table output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Delimited text.
    Csv,
    /// JSON document with columns and rows.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" | "table" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
