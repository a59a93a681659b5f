//! Comparison charts for benchmark timings
//!
//! [`build_figure`] turns a [`BenchmarkTable`] into a backend-free [`Figure`]
//! (which panels, which series, which points). [`render_figure`] rasterizes
//! that description with [`plotters`] into a single PNG with the panels side
//! by side.

use crate::errors::{BenchPlotError, BenchPlotResult};
use crate::table::BenchmarkTable;
use plotters::coord::ranged1d::ValueFormatter;
use plotters::element::{Drawable, PointCollection};
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use tracing::debug;

const FONT_FAMILY: &str = "sans-serif";
const TICK_FONT_PT: f64 = 10.0;
const AXIS_DESC_FONT_PT: f64 = 10.0;
const TITLE_FONT_PT: f64 = 12.0;
const LINE_WIDTH_PT: f64 = 2.0;
const MARKER_RADIUS_PT: f64 = 3.0;
const GRID_ALPHA: f64 = 0.3;
/// Fraction of the data span added on each side of an axis.
const AXIS_MARGIN: f64 = 0.05;

const DARK_GREEN: RGBColor = RGBColor(0, 128, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    InsertionSort,
    HeapSort,
    StdSort,
}

impl Algorithm {
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::InsertionSort => "Insertion Sort",
            Algorithm::HeapSort => "Heap Sort",
            Algorithm::StdSort => "std::sort",
        }
    }

    pub fn color(&self) -> RGBColor {
        match self {
            Algorithm::InsertionSort => RED,
            Algorithm::HeapSort => BLUE,
            Algorithm::StdSort => DARK_GREEN,
        }
    }

    pub fn marker(&self) -> MarkerShape {
        match self {
            Algorithm::InsertionSort => MarkerShape::Circle,
            Algorithm::HeapSort => MarkerShape::Square,
            Algorithm::StdSort => MarkerShape::Triangle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
    Triangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Linear,
    LogLog,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub algorithm: Algorithm,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub scale: Scale,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<Series>,
}

impl Panel {
    pub fn has_series(&self, algorithm: Algorithm) -> bool {
        self.series.iter().any(|s| s.algorithm == algorithm)
    }

    pub fn algorithms(&self) -> Vec<Algorithm> {
        self.series.iter().map(|s| s.algorithm).collect()
    }

    pub fn x_range(&self) -> Range<f64> {
        axis_range(self.points().map(|(x, _)| x), self.scale)
    }

    pub fn y_range(&self) -> Range<f64> {
        axis_range(self.points().map(|(_, y)| y), self.scale)
    }

    fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.series.iter().flat_map(|s| s.points.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub panels: Vec<Panel>,
}

/// Physical figure geometry. Everything drawn is sized in points and
/// converted to pixels through `dpi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureStyle {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            width_in: 14.0,
            height_in: 6.0,
            dpi: 300,
        }
    }
}

impl FigureStyle {
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }

    /// Convert typographic points to pixels.
    pub fn px(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.0
    }

    fn px_u32(&self, points: f64) -> u32 {
        self.px(points).round().max(1.0) as u32
    }
}

/// Describe the linear and log-log panels for `table`.
///
/// The insertion-sort series only appears when every insertion timing is a
/// real measurement; heap sort and std::sort are always present.
pub fn build_figure(table: &BenchmarkTable) -> Figure {
    let mut algorithms = Vec::with_capacity(3);
    if table.insertion_measured() {
        algorithms.push(Algorithm::InsertionSort);
    } else {
        debug!("Insertion sort has unmeasured sizes, leaving it out of the charts");
    }
    algorithms.push(Algorithm::HeapSort);
    algorithms.push(Algorithm::StdSort);

    let linear = Panel {
        scale: Scale::Linear,
        title: "Performance Comparison (Linear)",
        x_label: "Array Size",
        y_label: "Time (microseconds)",
        series: algorithms
            .iter()
            .map(|&a| series_for(table, a, Scale::Linear))
            .collect(),
    };

    let log_log = Panel {
        scale: Scale::LogLog,
        title: "Performance Comparison (Log-Log)",
        x_label: "Array Size (log scale)",
        y_label: "Time (microseconds, log scale)",
        series: algorithms
            .iter()
            .map(|&a| series_for(table, a, Scale::LogLog))
            .collect(),
    };

    Figure {
        panels: vec![linear, log_log],
    }
}

fn series_for(table: &BenchmarkTable, algorithm: Algorithm, scale: Scale) -> Series {
    let points = table
        .rows()
        .iter()
        .map(|row| {
            let y = match algorithm {
                Algorithm::InsertionSort => row.insertion_us,
                Algorithm::HeapSort => row.heap_us,
                Algorithm::StdSort => row.std_sort_us,
            };
            (row.size as f64, y)
        })
        // log axes cannot place non-positive values
        .filter(|&(x, y)| scale == Scale::Linear || (x > 0.0 && y > 0.0))
        .collect();

    Series { algorithm, points }
}

/// Padded axis range covering `values`. Never empty, and strictly positive
/// for [`Scale::LogLog`].
pub fn axis_range(values: impl Iterator<Item = f64>, scale: Scale) -> Range<f64> {
    let (lo, hi) = match scale {
        Scale::Linear => min_max(values.filter(|v| v.is_finite())),
        Scale::LogLog => min_max(values.filter(|v| v.is_finite() && *v > 0.0).map(f64::log10)),
    };

    let (lo, hi) = match (lo, hi) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => {
            return match scale {
                Scale::Linear => 0.0..1.0,
                Scale::LogLog => 1.0..10.0,
            }
        }
    };

    let span = hi - lo;
    let pad = if span > 0.0 {
        span * AXIS_MARGIN
    } else {
        match scale {
            Scale::Linear if lo != 0.0 => lo.abs() * AXIS_MARGIN,
            Scale::Linear => 1.0,
            Scale::LogLog => 0.5,
        }
    };

    match scale {
        Scale::Linear => (lo - pad)..(hi + pad),
        Scale::LogLog => 10f64.powf(lo - pad)..10f64.powf(hi + pad),
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (Option<f64>, Option<f64>) {
    values.fold((None, None), |(lo, hi), v| {
        (
            Some(lo.map_or(v, |l: f64| l.min(v))),
            Some(hi.map_or(v, |h: f64| h.max(v))),
        )
    })
}

/// Integer tick labels for the size axis (`10000`, not `10000.0`).
pub fn format_tick(value: f64) -> String {
    format!("{:.0}", value)
}

fn render_error<E: std::fmt::Display>(e: E) -> BenchPlotError {
    BenchPlotError::Render(e.to_string())
}

/// Draw `figure` into a PNG at `output_path`, panels laid out left to right.
pub fn render_figure(figure: &Figure, output_path: &Path, style: &FigureStyle) -> BenchPlotResult<()> {
    let (width, height) = style.pixel_size();
    debug!("Rendering {}x{} px to {:?}", width, height, output_path);

    let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let columns = figure.panels.len().max(1);
    let areas = root.split_evenly((1, columns));

    for (area, panel) in areas.iter().zip(&figure.panels) {
        let x = panel.x_range();
        let y = panel.y_range();

        let mut builder = ChartBuilder::on(area);
        builder
            .caption(panel.title, (FONT_FAMILY, style.px(TITLE_FONT_PT)))
            .margin(style.px_u32(10.0))
            .x_label_area_size(style.px_u32(30.0))
            .y_label_area_size(style.px_u32(45.0));

        match panel.scale {
            Scale::Linear => {
                let mut chart = builder
                    .build_cartesian_2d(x, y)
                    .map_err(render_error)?;
                draw_panel(&mut chart, panel, style)?;
            }
            Scale::LogLog => {
                let mut chart = builder
                    .build_cartesian_2d(x.log_scale(), y.log_scale())
                    .map_err(render_error)?;
                draw_panel(&mut chart, panel, style)?;
            }
        }
    }

    root.present().map_err(render_error)?;
    Ok(())
}

fn draw_panel<'a, DB, X, Y>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<X, Y>>,
    panel: &Panel,
    style: &FigureStyle,
) -> BenchPlotResult<()>
where
    DB: DrawingBackend + 'a,
    X: Ranged<ValueType = f64> + ValueFormatter<f64>,
    Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    chart
        .configure_mesh()
        .x_desc(panel.x_label)
        .y_desc(panel.y_label)
        .x_label_formatter(&|v| format_tick(*v))
        .label_style((FONT_FAMILY, style.px(TICK_FONT_PT)))
        .axis_desc_style((FONT_FAMILY, style.px(AXIS_DESC_FONT_PT)))
        .bold_line_style(BLACK.mix(GRID_ALPHA).stroke_width(style.px_u32(0.8)))
        .light_line_style(TRANSPARENT)
        .draw()
        .map_err(render_error)?;

    for series in &panel.series {
        draw_series(chart, series, style)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((FONT_FAMILY, style.px(TICK_FONT_PT)))
        .legend_area_size(style.px_u32(30.0))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .draw()
        .map_err(render_error)?;

    Ok(())
}

/// Line plus markers for one series, with a matching legend entry.
fn draw_series<'a, DB, X, Y>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<X, Y>>,
    series: &Series,
    style: &FigureStyle,
) -> BenchPlotResult<()>
where
    DB: DrawingBackend + 'a,
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
{
    let color = series.algorithm.color();
    let line = color.stroke_width(style.px_u32(LINE_WIDTH_PT));
    let fill = color.filled();
    let r = style.px(MARKER_RADIUS_PT).round() as i32;
    let h = style.px(10.0).round() as i32;

    let anno = chart
        .draw_series(LineSeries::new(series.points.iter().copied(), line))
        .map_err(render_error)?
        .label(series.algorithm.label());

    // Legend entries are line + marker, centred on the swatch area.
    match series.algorithm.marker() {
        MarkerShape::Circle => {
            anno.legend(move |(x, y)| {
                EmptyElement::at((x + h, y))
                    + PathElement::new(vec![(-h, 0), (h, 0)], line)
                    + Circle::new((0, 0), r, fill)
            });
        }
        MarkerShape::Square => {
            anno.legend(move |(x, y)| {
                EmptyElement::at((x + h, y))
                    + PathElement::new(vec![(-h, 0), (h, 0)], line)
                    + Rectangle::new([(-r, -r), (r, r)], fill)
            });
        }
        MarkerShape::Triangle => {
            anno.legend(move |(x, y)| {
                EmptyElement::at((x + h, y))
                    + PathElement::new(vec![(-h, 0), (h, 0)], line)
                    + TriangleMarker::new((0, 0), r, fill)
            });
        }
    }

    match series.algorithm.marker() {
        MarkerShape::Circle => draw_markers(chart, series, |p| {
            EmptyElement::at(p) + Circle::new((0, 0), r, fill)
        }),
        MarkerShape::Square => draw_markers(chart, series, |p| {
            EmptyElement::at(p) + Rectangle::new([(-r, -r), (r, r)], fill)
        }),
        MarkerShape::Triangle => draw_markers(chart, series, |p| {
            EmptyElement::at(p) + TriangleMarker::new((0, 0), r, fill)
        }),
    }
}

/// One marker element per data point of `series`.
fn draw_markers<'a, DB, X, Y, E, F>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<X, Y>>,
    series: &Series,
    marker: F,
) -> BenchPlotResult<()>
where
    DB: DrawingBackend + 'a,
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
    E: Drawable<DB>,
    for<'b> &'b E: PointCollection<'b, (f64, f64)>,
    F: Fn((f64, f64)) -> E,
{
    chart
        .draw_series(series.points.iter().map(|&p| marker(p)))
        .map_err(render_error)?;
    Ok(())
}
