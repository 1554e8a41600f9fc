//! Comparison chart rendering.

mod render;
mod style;

pub use render::{
    ChartGroup, chart_file_name, group_points, render_metabolite_chart, value_range,
};
pub use style::ChartStyle;
