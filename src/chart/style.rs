//! Fixed chart styling.

use plotters::style::RGBColor;

use crate::config::ChartConfig;
use crate::record::Condition;

/// Styling applied to every metabolite chart.
#[derive(Debug, Clone)]
pub struct ChartStyle {
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
    /// Series colour for the high-isoflurane condition.
    pub high_color: RGBColor,
    /// Series colour for the low-isoflurane condition.
    pub low_color: RGBColor,
}

impl ChartStyle {
    /// Series colour of a condition.
    pub const fn color_for(&self, condition: Condition) -> RGBColor {
        match condition {
            Condition::IsoHigh => self.high_color,
            Condition::IsoLow => self.low_color,
        }
    }
}

impl From<&ChartConfig> for ChartStyle {
    fn from(config: &ChartConfig) -> Self {
        let [hr, hg, hb] = config.high_color;
        let [lr, lg, lb] = config.low_color;
        Self {
            width: config.width,
            height: config.height,
            caption_font_size: config.caption_font_size,
            label_font_size: config.label_font_size,
            point_radius: config.point_radius,
            box_width: config.box_width,
            high_color: RGBColor(hr, hg, hb),
            low_color: RGBColor(lr, lg, lb),
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::from(&ChartConfig::default())
    }
}
