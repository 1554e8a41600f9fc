//! Per-metabolite box-and-scatter charts.
//!
//! The x axis lists the genotypes in a fixed order, each with one box per
//! condition side by side. Every subject is overlaid as a marker, spread
//! horizontally within its box so overlapping values stay visible.

use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::debug;

use crate::chart::ChartStyle;
use crate::constants::{chart::Y_PADDING, output_extensions};
use crate::error::{Error, Result};
use crate::merge::{ConcentrationPoint, MergedTable};
use crate::record::{Condition, Genotype};

type DrawResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Gap between the two boxes of a genotype, in pixels.
const BOX_GAP: u32 = 6;

/// Concentrations of one genotype under one condition.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGroup {
    /// Genetic group.
    pub genotype: Genotype,
    /// Condition.
    pub condition: Condition,
    /// Concentrations, in subject order.
    pub values: Vec<f64>,
}

/// Render the chart of one metabolite into `chart_dir`.
///
/// Returns the path of the written PNG.
///
/// # Errors
///
/// Returns an error if the image cannot be drawn or saved.
pub fn render_metabolite_chart(
    table: &MergedTable,
    metabolite: &str,
    chart_dir: &Path,
    style: &ChartStyle,
) -> Result<PathBuf> {
    let conditions = table.conditions();
    let path = chart_dir.join(chart_file_name(metabolite, conditions));
    let groups = group_points(&table.concentrations(metabolite), conditions);

    draw_chart(&path, metabolite, &groups, conditions, style).map_err(|e| {
        Error::ChartRender {
            path: path.clone(),
            reason: e.to_string(),
        }
    })?;

    debug!("Wrote chart for {metabolite}: {}", path.display());
    Ok(path)
}

/// Split points into one group per genotype and condition.
///
/// Groups are ordered by genotype display order, then by `conditions`.
/// Genotypes without subjects still get (empty) groups.
pub fn group_points(points: &[ConcentrationPoint], conditions: [Condition; 2]) -> Vec<ChartGroup> {
    Genotype::ALL
        .into_iter()
        .flat_map(|genotype| {
            conditions.into_iter().map(move |condition| ChartGroup {
                genotype,
                condition,
                values: points
                    .iter()
                    .filter(|p| p.genotype == genotype && p.condition == condition)
                    .map(|p| p.value)
                    .collect(),
            })
        })
        .collect()
}

/// Y axis range covering every value with some padding.
#[allow(clippy::cast_possible_truncation)]
pub fn value_range(groups: &[ChartGroup]) -> Range<f32> {
    let (min, max) = groups
        .iter()
        .flat_map(|g| g.values.iter().copied())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return 0.0..1.0;
    }

    let (min, max) = (min as f32, max as f32);
    let span = max - min;
    if span <= f32::EPSILON {
        return (min - 1.0)..(max + 1.0);
    }

    let pad = span * Y_PADDING;
    (min - pad)..(max + pad)
}

/// File name of a metabolite chart, e.g. `NAA_iso_high_vs_iso_low.png`.
pub fn chart_file_name(metabolite: &str, conditions: [Condition; 2]) -> String {
    format!(
        "{}_{}_vs_{}.{}",
        sanitize_filename(metabolite),
        conditions[0],
        conditions[1],
        output_extensions::PNG
    )
}

/// Sanitize a string for use as a file name.
///
/// Replaces characters that are invalid in filenames across platforms
/// and prevents path traversal.
fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();

    sanitized.replace("..", "__")
}

/// Horizontal pixel offset of a condition's box within its genotype slot.
#[allow(clippy::cast_possible_wrap)]
fn hue_offset(slot: usize, box_width: u32) -> i32 {
    let shift = ((box_width + BOX_GAP) / 2) as i32;
    if slot == 0 { -shift } else { shift }
}

/// Deterministic horizontal spread of `count` markers over `[-half, half]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn jitter_offset(index: usize, count: usize, half: i32) -> i32 {
    if count < 2 || half == 0 {
        return 0;
    }
    let step = f64::from(2 * half) / (count - 1) as f64;
    step.mul_add(index as f64, f64::from(-half)).round() as i32
}

fn group_values(groups: &[ChartGroup], genotype: Genotype, condition: Condition) -> &[f64] {
    groups
        .iter()
        .find(|g| g.genotype == genotype && g.condition == condition)
        .map(|g| g.values.as_slice())
        .unwrap_or_default()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn draw_chart(
    path: &Path,
    metabolite: &str,
    groups: &[ChartGroup],
    conditions: [Condition; 2],
    style: &ChartStyle,
) -> DrawResult<()> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let caption_font = ("sans-serif", f64::from(style.caption_font_size)).into_font();
    let label_font = ("sans-serif", f64::from(style.label_font_size)).into_font();

    let axis: Vec<&str> = Genotype::ALL.iter().map(|g| g.label()).collect();

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(format!("{metabolite} concentration"), caption_font)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(axis[..].into_segmented(), value_range(groups))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(&BLACK.mix(0.05))
        .x_desc("Genotype")
        .y_desc("Concentration")
        .label_style(label_font.clone())
        .axis_desc_style(label_font)
        .x_label_formatter(&|v| match v {
            SegmentValue::Exact(g) | SegmentValue::CenterOf(g) => g.to_string(),
            SegmentValue::Last => String::new(),
        })
        .draw()?;

    let radius = style.point_radius as i32;
    let spread = (style.box_width / 4) as i32;

    for (slot, condition) in conditions.into_iter().enumerate() {
        let color = style.color_for(condition);
        let offset = hue_offset(slot, style.box_width);

        let boxes: Vec<_> = axis
            .iter()
            .zip(Genotype::ALL)
            .filter_map(|(label, genotype)| {
                let values = group_values(groups, genotype, condition);
                (!values.is_empty()).then(|| {
                    Boxplot::new_vertical(SegmentValue::CenterOf(label), &Quartiles::new(values))
                        .width(style.box_width)
                        .whisker_width(0.5)
                        .style(color.stroke_width(2))
                        .offset(offset)
                })
            })
            .collect();

        chart
            .draw_series(boxes)?
            .label(condition.label())
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled()));

        let markers = axis
            .iter()
            .zip(Genotype::ALL)
            .flat_map(|(label, genotype)| {
                let values = group_values(groups, genotype, condition);
                let count = values.len();
                values.iter().enumerate().map(move |(i, &v)| {
                    let dx = offset + jitter_offset(i, count, spread);
                    EmptyElement::at((SegmentValue::CenterOf(label), v as f32))
                        + Circle::new((dx, 0), radius, color.mix(0.8).filled())
                })
            });
        chart.draw_series(markers)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
