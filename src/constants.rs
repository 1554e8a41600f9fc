//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "mrs-merge";

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Index of the first metabolite column in a spreadsheet row.
pub const FIRST_METABOLITE_COLUMN: usize = 2;

/// Number of columns per metabolite group (concentration, %SD, ratio).
pub const METABOLITE_GROUP_WIDTH: usize = 3;

/// Separator between the metabolite/sub-field part and the condition label
/// in merged column names.
pub const COLUMN_SEPARATOR: &str = " ";

/// Identity columns that lead every merged row.
pub const IDENTITY_COLUMNS: [&str; 3] = ["Id", "Genotype", "Gender"];

/// Directory-name layout defaults.
///
/// Subject directories look like `Study_7_x_x_x_x_Tg_M`.
pub mod layout {
    /// Delimiter between subject directory name components.
    pub const DELIMITER: &str = "_";

    /// Component index holding the subject id.
    pub const ID_INDEX: usize = 1;

    /// Component index holding the genotype.
    pub const GENOTYPE_INDEX: usize = 6;

    /// Component index holding the gender.
    pub const GENDER_INDEX: usize = 7;

    /// Substring that marks a condition directory as the high-isoflurane one.
    pub const CONDITION_MARKER: &str = "high";

    /// Spreadsheet file name inside each condition directory.
    pub const SPREADSHEET_NAME: &str = "spreadsheet.csv";
}

/// Merged table output defaults.
pub mod output {
    /// Default file stem of the merged table.
    pub const TABLE_NAME: &str = "MRS_Data";

    /// Default table field delimiter.
    pub const DELIMITER: char = ',';

    /// Default chart directory, relative to the output directory.
    pub const CHART_DIR: &str = "charts";

    /// UTF-8 byte order mark.
    pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
}

/// Output file extensions by format.
pub mod output_extensions {
    /// CSV table extension.
    pub const CSV: &str = "csv";

    /// JSON table extension.
    pub const JSON: &str = "json";

    /// Chart image extension.
    pub const PNG: &str = "png";
}

/// Chart styling defaults.
pub mod chart {
    /// Chart width in pixels.
    pub const WIDTH: u32 = 1000;

    /// Chart height in pixels.
    pub const HEIGHT: u32 = 700;

    /// Caption font size.
    pub const CAPTION_FONT_SIZE: u32 = 28;

    /// Axis label font size.
    pub const LABEL_FONT_SIZE: u32 = 18;

    /// Radius of the per-subject markers.
    pub const POINT_RADIUS: u32 = 4;

    /// Box width in pixels.
    pub const BOX_WIDTH: u32 = 40;

    /// Box colour for the high-isoflurane condition.
    pub const HIGH_COLOR: [u8; 3] = [76, 114, 176];

    /// Box colour for the low-isoflurane condition.
    pub const LOW_COLOR: [u8; 3] = [221, 132, 82];

    /// Relative padding added above and below the value range.
    pub const Y_PADDING: f32 = 0.1;
}
