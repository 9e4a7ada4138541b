use crate::series::Series;
use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

// Font sizes
const TITLE_FONT_SIZE: u32 = 32;
const PANEL_TITLE_FONT_SIZE: u32 = 20;
const AXIS_LABEL_FONT_SIZE: u32 = 16;
const TICK_LABEL_FONT_SIZE: u32 = 13;
const LEGEND_FONT_SIZE: u32 = 13;

const POINT_SIZE: u32 = 4;
const LINE_WIDTH: u32 = 2;

/// How the panels of a figure are arranged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One panel per row
    Stacked,
    /// One panel per column
    SideBySide,
}

/// Axis formatting for a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelStyle {
    pub y_desc: &'static str,
    /// Label the y axis in scientific notation
    pub scientific: bool,
    /// Only label x ticks at thread counts present in the panel
    pub ticks_at_threads: bool,
}

/// One chart: a titled set of series over thread count
#[derive(Debug, Clone)]
pub struct Panel {
    pub title: String,
    pub series: Vec<Series>,
    pub style: PanelStyle,
}

impl Panel {
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(Series::is_empty)
    }
}

/// A multi-panel image written to one file. The file extension picks the
/// backend: `.png` renders a bitmap, anything else SVG.
#[derive(Debug, Clone)]
pub struct Figure {
    pub file_name: String,
    pub title: Option<String>,
    pub layout: Layout,
    pub size: (u32, u32),
    pub panels: Vec<Panel>,
}

/// Render a figure into `output_dir` and return the written path.
pub fn render_figure(figure: &Figure, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir).context("Failed to create output directory")?;
    let path = output_dir.join(&figure.file_name);

    let is_png = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);

    if is_png {
        let root = BitMapBackend::new(&path, figure.size).into_drawing_area();
        draw_figure(&root, figure)?;
        root.present()?;
    } else {
        let root = SVGBackend::new(&path, figure.size).into_drawing_area();
        draw_figure(&root, figure)?;
        root.present()?;
    }

    println!("Generated: {}", path.display());
    Ok(path)
}

fn draw_figure<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, figure: &Figure) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let body = match &figure.title {
        Some(title) => root.titled(title, ("sans-serif", TITLE_FONT_SIZE))?,
        None => root.clone(),
    };

    let count = figure.panels.len().max(1);
    let areas = match figure.layout {
        Layout::Stacked => body.split_evenly((count, 1)),
        Layout::SideBySide => body.split_evenly((1, count)),
    };

    for (area, panel) in areas.iter().zip(&figure.panels) {
        draw_panel(area, panel)?;
    }

    Ok(())
}

/// Draw a line-and-marker chart of throughput vs thread count
fn draw_panel<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, panel: &Panel) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let threads: BTreeSet<u64> = panel
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|(t, _)| *t))
        .collect();
    let ticks: Vec<u64> = threads.iter().copied().collect();

    let x_min = ticks.first().copied().unwrap_or(1) as f64;
    let x_max = ticks.last().copied().unwrap_or(1) as f64;
    let pad = ((x_max - x_min) * 0.05).max(0.5);

    let y_max = panel
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|(_, v)| *v))
        .fold(0.0_f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", PANEL_TITLE_FONT_SIZE))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d((x_min - pad)..(x_max + pad), 0.0..y_max)?;

    // Enough labels that every integer in range is a candidate tick.
    let x_labels = if panel.style.ticks_at_threads {
        ((x_max - x_min) as usize + 1).clamp(2, 128)
    } else {
        10
    };
    let only_threads = panel.style.ticks_at_threads;
    let scientific = panel.style.scientific;

    chart
        .configure_mesh()
        .x_labels(x_labels)
        .x_label_formatter(&|x| format_thread_tick(*x, &ticks, only_threads))
        .y_labels(8)
        .y_label_formatter(&|y| {
            if scientific {
                format_scientific(*y)
            } else {
                format_throughput(*y)
            }
        })
        .x_desc("Number of Threads")
        .y_desc(panel.style.y_desc)
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    for series in panel.series.iter().filter(|s| !s.is_empty()) {
        let color = series.color;
        let data: Vec<(f64, f64)> = series
            .points
            .iter()
            .map(|(threads, value)| (*threads as f64, *value))
            .collect();

        chart
            .draw_series(LineSeries::new(data.clone(), color.stroke_width(LINE_WIDTH)))?
            .label(series.variant.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
            });

        chart.draw_series(PointSeries::of_element(
            data,
            POINT_SIZE,
            color.filled(),
            &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
        ))?;
    }

    if !panel.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", LEGEND_FONT_SIZE))
            .draw()?;
    }

    Ok(())
}

/// Label integral x positions; with `only_threads`, just the measured ones.
fn format_thread_tick(x: f64, threads: &[u64], only_threads: bool) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    let value = rounded as u64;
    if only_threads && !threads.contains(&value) {
        return String::new();
    }
    value.to_string()
}

fn format_scientific(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{:.1e}", value)
    }
}

/// Format throughput for display
fn format_throughput(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.0}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}
