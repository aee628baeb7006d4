//! Chart rendering on top of plotters.
//!
//! One line per variant in a fixed color cycle, grid, legend, and the
//! environment annotation box. Size-indexed charts use a logarithmic
//! x-axis with ticks at the four message sizes; the thread-count chart is
//! linear with ticks at the four thread counts. Charts are written to a
//! temporary path and renamed into place so an interrupted run never
//! leaves a truncated image behind.

use crate::dataset::KeyAxis;
use crate::reduce::DerivedSeries;
use crate::Variant;
use anyhow::{Context, Result};
use plotters::chart::ChartContext;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;

// Font sizes, scaled for 300-DPI-equivalent output
const TITLE_FONT_SIZE: u32 = 58;
const AXIS_LABEL_FONT_SIZE: u32 = 50;
const TICK_LABEL_FONT_SIZE: u32 = 42;
const LEGEND_FONT_SIZE: u32 = 42;
const ANNOTATION_FONT_SIZE: u32 = 29;

const LINE_WIDTH: u32 = 8;
const MARKER_SIZE: i32 = 14;

/// Color cycle, one entry per variant in display order
const VARIANT_COLORS: [RGBColor; 3] = [
    RGBColor(31, 119, 180),  // TwoCopy - blue
    RGBColor(255, 127, 14),  // OneCopy - orange
    RGBColor(44, 160, 44),   // ZeroCopy - green
];

pub fn variant_color(variant: Variant) -> RGBColor {
    match variant {
        Variant::TwoCopy => VARIANT_COLORS[0],
        Variant::OneCopy => VARIANT_COLORS[1],
        Variant::ZeroCopy => VARIANT_COLORS[2],
    }
}

/// Output configuration shared by every chart binary
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Directory the images and sidecars land in
    pub output_dir: PathBuf,
    /// Single-panel image size (pixels)
    pub width: u32,
    pub height: u32,
    /// Width of the two-panel cache-miss image (pixels)
    pub dual_width: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("plots"),
            width: 3000,
            height: 1800,
            dual_width: 4800,
        }
    }
}

/// One chart panel: the reduced series plus labeling
pub struct PanelSpec<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub series: &'a [DerivedSeries],
    pub axis: KeyAxis,
    /// Multiplier applied to y values at draw time only (e.g. 1e-6 to
    /// plot raw event counts in millions)
    pub y_scale: f64,
}

/// Render a single-panel line chart to `<output_dir>/<name>.png`.
pub fn render_line_chart(
    config: &ChartConfig,
    name: &str,
    panel: &PanelSpec<'_>,
    annotation: &str,
) -> Result<PathBuf> {
    let (final_path, tmp_path) = prepare_paths(config, name)?;
    {
        let root =
            BitMapBackend::new(&tmp_path, (config.width, config.height)).into_drawing_area();
        root.fill(&WHITE)?;
        draw_panel(&root, panel)?;
        draw_annotation(&root, annotation)?;
        root.present()
            .with_context(|| format!("failed to render {}", tmp_path.display()))?;
    }
    fs::rename(&tmp_path, &final_path)
        .with_context(|| format!("failed to move chart into place at {}", final_path.display()))?;
    Ok(final_path)
}

/// Render two independent panels side by side under a shared title
/// (independent y ranges, same x semantics).
pub fn render_dual_chart(
    config: &ChartConfig,
    name: &str,
    title: &str,
    left: &PanelSpec<'_>,
    right: &PanelSpec<'_>,
    annotation: &str,
) -> Result<PathBuf> {
    let (final_path, tmp_path) = prepare_paths(config, name)?;
    {
        let root =
            BitMapBackend::new(&tmp_path, (config.dual_width, config.height)).into_drawing_area();
        root.fill(&WHITE)?;
        let titled = root.titled(title, ("sans-serif", TITLE_FONT_SIZE))?;
        let panels = titled.split_evenly((1, 2));
        draw_panel(&panels[0], left)?;
        draw_panel(&panels[1], right)?;
        draw_annotation(&root, annotation)?;
        root.present()
            .with_context(|| format!("failed to render {}", tmp_path.display()))?;
    }
    fs::rename(&tmp_path, &final_path)
        .with_context(|| format!("failed to move chart into place at {}", final_path.display()))?;
    Ok(final_path)
}

fn prepare_paths(config: &ChartConfig, name: &str) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;
    let final_path = config.output_dir.join(format!("{name}.png"));
    let tmp_path = config.output_dir.join(format!("{name}.png.tmp"));
    Ok((final_path, tmp_path))
}

fn draw_panel(area: &DrawingArea<BitMapBackend<'_>, Shift>, panel: &PanelSpec<'_>) -> Result<()> {
    match panel.axis {
        KeyAxis::MessageSize => draw_size_panel(area, panel),
        KeyAxis::ThreadCount => draw_thread_panel(area, panel),
    }
}

/// Size-indexed panel: log x-axis over message size in KB, ticks at the
/// four canonical sizes.
fn draw_size_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    panel: &PanelSpec<'_>,
) -> Result<()> {
    let y_max = panel_y_max(panel);
    let x_spec = (0.35..90.0)
        .log_scale()
        .with_key_points(vec![0.5, 4.0, 16.0, 64.0]);

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(30)
        .x_label_area_size(120)
        .y_label_area_size(150)
        .build_cartesian_2d(x_spec, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|x| {
            if *x < 1.0 {
                format!("{x:.1}")
            } else {
                format!("{x:.0}")
            }
        })
        .x_desc(panel.x_label)
        .y_desc(panel.y_label)
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    draw_series_set(&mut chart, panel)?;
    Ok(())
}

/// Thread-indexed panel: linear x-axis with ticks at the four thread
/// counts.
fn draw_thread_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    panel: &PanelSpec<'_>,
) -> Result<()> {
    let y_max = panel_y_max(panel);
    let x_spec = DefaultFmt((0.0..9.0).with_key_points(vec![1.0, 2.0, 4.0, 8.0]));

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(30)
        .x_label_area_size(120)
        .y_label_area_size(150)
        .build_cartesian_2d(x_spec, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|x| format!("{x:.0}"))
        .x_desc(panel.x_label)
        .y_desc(panel.y_label)
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    draw_series_set(&mut chart, panel)?;
    Ok(())
}

/// Format-option shim for linear `f64` axes with custom key points.
///
/// `WithKeyPoints<RangedCoordf64>` inherits `NoDefaultFormatting` from the
/// inner `f64` coordinate and forwards no `ValueFormatter`, so it does not
/// satisfy `configure_mesh`'s `ValueFormatter` bound (the log-scaled size
/// axis avoids this only because `LogCoord` is `DefaultFormatting`). This
/// transparent wrapper re-exposes the same coordinate under
/// `DefaultFormatting` so the blanket `ValueFormatter` applies. Tick labels
/// are supplied by `x_label_formatter`, so the formatter choice is never
/// visible.
struct DefaultFmt<R>(R);

impl<R: Ranged> Ranged for DefaultFmt<R> {
    type FormatOption = DefaultFormatting;
    type ValueType = R::ValueType;

    fn map(&self, value: &Self::ValueType, limit: (i32, i32)) -> i32 {
        self.0.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<Self::ValueType> {
        self.0.key_points(hint)
    }

    fn range(&self) -> std::ops::Range<Self::ValueType> {
        self.0.range()
    }

    fn axis_pixel_range(&self, limit: (i32, i32)) -> std::ops::Range<i32> {
        self.0.axis_pixel_range(limit)
    }
}

fn draw_series_set<'a, X, Y>(
    chart: &mut ChartContext<'a, BitMapBackend<'a>, Cartesian2d<X, Y>>,
    panel: &PanelSpec<'_>,
) -> Result<()>
where
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
{
    for s in panel.series {
        let color = variant_color(s.variant);
        let data: Vec<(f64, f64)> = s
            .points
            .iter()
            .map(|&(key, value)| (x_value(panel.axis, key), value * panel.y_scale))
            .collect();

        chart
            .draw_series(LineSeries::new(data.clone(), color.stroke_width(LINE_WIDTH)))?
            .label(s.variant.label())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 50, y)], color.stroke_width(LINE_WIDTH))
            });

        chart.draw_series(PointSeries::of_element(
            data,
            MARKER_SIZE,
            color.filled(),
            &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
        ))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .draw()?;

    Ok(())
}

/// Stamp the environment annotation in the bottom-left corner of the
/// drawing area.
fn draw_annotation(root: &DrawingArea<BitMapBackend<'_>, Shift>, annotation: &str) -> Result<()> {
    let (_, height) = root.dim_in_pixel();
    let line_height = (ANNOTATION_FONT_SIZE + 8) as i32;
    let lines: Vec<&str> = annotation.lines().collect();
    let base_y = height as i32 - 16 - line_height * lines.len() as i32;
    let style = ("monospace", ANNOTATION_FONT_SIZE)
        .into_font()
        .color(&BLACK.mix(0.65));
    for (i, line) in lines.iter().enumerate() {
        root.draw(&Text::new(
            (*line).to_string(),
            (24, base_y + i as i32 * line_height),
            style.clone(),
        ))?;
    }
    Ok(())
}

fn panel_y_max(panel: &PanelSpec<'_>) -> f64 {
    let max = panel
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(_, v)| v * panel.y_scale))
        .fold(0.0_f64, f64::max);
    (max * 1.15).max(1.0)
}

fn x_value(axis: KeyAxis, key: u64) -> f64 {
    match axis {
        KeyAxis::MessageSize => key as f64 / 1024.0,
        KeyAxis::ThreadCount => key as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_value_maps_sizes_to_kb() {
        assert_eq!(x_value(KeyAxis::MessageSize, 512), 0.5);
        assert_eq!(x_value(KeyAxis::MessageSize, 65536), 64.0);
        assert_eq!(x_value(KeyAxis::ThreadCount, 8), 8.0);
    }

    #[test]
    fn test_each_variant_has_a_distinct_color() {
        let rgb = |c: RGBColor| (c.0, c.1, c.2);
        let a = rgb(variant_color(Variant::TwoCopy));
        let b = rgb(variant_color(Variant::OneCopy));
        let c = rgb(variant_color(Variant::ZeroCopy));
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_panel_y_max_has_headroom() {
        let series = vec![DerivedSeries {
            variant: Variant::TwoCopy,
            points: vec![(512, 10.0), (4096, 20.0)],
        }];
        let panel = PanelSpec {
            title: "t",
            x_label: "x",
            y_label: "y",
            series: &series,
            axis: KeyAxis::MessageSize,
            y_scale: 1.0,
        };
        let y_max = panel_y_max(&panel);
        assert!(y_max > 20.0);
    }
}
