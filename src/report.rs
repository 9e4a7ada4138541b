use crate::aggregate::{aggregate, print_summary, AggregatedPoint};
use crate::chart::{render_figure, Figure, Layout, Panel, PanelStyle};
use crate::config::ReportConfig;
use crate::error::DecodeError;
use crate::grammar::{is_runner_summary, DecodedCase, Grammar};
use crate::input::{load_records, RawRecord};
use crate::series::{project, Slice};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const QUEUE_FIGURE_TITLE: &str = "Queue Implementation Performance Comparison";
const QUEUE_FIGURE_FILE: &str = "queue_performance_comparison.png";

const LIST_STYLE: PanelStyle = PanelStyle {
    y_desc: "Operations per Second",
    scientific: false,
    ticks_at_threads: false,
};

const QUEUE_STYLE: PanelStyle = PanelStyle {
    y_desc: "Operations Per Second",
    scientific: true,
    ticks_at_threads: true,
};

/// Paths for one report run
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Also write the aggregated points as JSON
    pub json: Option<PathBuf>,
}

/// Decode every record. Records are decoded in parallel; the error returned
/// is the one for the earliest failing record in input order.
pub fn decode_all(
    grammar: Grammar,
    records: &[RawRecord],
) -> Result<Vec<DecodedCase>, DecodeError> {
    let decoded: Vec<Result<DecodedCase, DecodeError>> = records
        .par_iter()
        .map(|record| grammar.decode_record(record))
        .collect();
    decoded.into_iter().collect()
}

/// Drop repetition summaries the runner appends next to the trials.
fn without_runner_summaries(records: Vec<RawRecord>) -> Vec<RawRecord> {
    let total = records.len();
    let trials: Vec<RawRecord> = records
        .into_iter()
        .filter(|r| !is_runner_summary(&r.case_name))
        .collect();

    let skipped = total - trials.len();
    if skipped > 0 {
        warn!(skipped, "skipped runner summary rows (mean/median/stddev/cv)");
    }
    trials
}

/// Decode and aggregate a loaded table. Fails on the first malformed name.
pub fn aggregate_records(
    records: Vec<RawRecord>,
    config: &ReportConfig,
) -> Result<Vec<AggregatedPoint>, DecodeError> {
    let records = without_runner_summaries(records);
    let cases = decode_all(config.grammar, &records)?;
    let points = aggregate(cases);
    warn_unconfigured_variants(&points, config);
    Ok(points)
}

fn warn_unconfigured_variants(points: &[AggregatedPoint], config: &ReportConfig) {
    let unknown: BTreeSet<&str> = points
        .iter()
        .map(|p| p.key.variant.as_str())
        .filter(|v| config.color_of(v).is_none())
        .collect();

    for variant in unknown {
        warn!(variant, "variant has no configured color; not plotted");
    }
}

/// Lay out every figure the family produces.
pub fn build_figures(points: &[AggregatedPoint], config: &ReportConfig) -> Vec<Figure> {
    match config.grammar {
        Grammar::List => config
            .sizes_to_report
            .iter()
            .map(|size| list_figure(points, config, size.value()))
            .collect(),
        Grammar::Queue => vec![queue_figure(points, config)],
    }
}

/// One stacked panel per workload for a single list size
fn list_figure(points: &[AggregatedPoint], config: &ReportConfig, size: u64) -> Figure {
    let panels: Vec<Panel> = config
        .workload_descriptions
        .iter()
        .map(|(workload, description)| Panel {
            title: format!("{} - {} (Size={})", workload.tag(), description, size),
            series: project(points, Slice::list(*workload, size), config),
            style: LIST_STYLE,
        })
        .collect();

    Figure {
        file_name: format!("list_size_{}.svg", size),
        title: None,
        layout: Layout::Stacked,
        size: (800, 400 * panels.len().max(1) as u32),
        panels,
    }
}

/// One side-by-side panel per operation count
fn queue_figure(points: &[AggregatedPoint], config: &ReportConfig) -> Figure {
    let panels: Vec<Panel> = config
        .sizes_to_report
        .iter()
        .map(|size| {
            let operations = size.value();
            Panel {
                title: format!("Operations Count: {}", operations),
                series: project(points, Slice::queue(operations), config),
                style: QUEUE_STYLE,
            }
        })
        .collect();

    Figure {
        file_name: QUEUE_FIGURE_FILE.to_string(),
        title: Some(QUEUE_FIGURE_TITLE.to_string()),
        layout: Layout::SideBySide,
        size: (600 * panels.len().max(1) as u32, 650),
        panels,
    }
}

fn write_json(points: &[AggregatedPoint], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context("Failed to create JSON output directory")?;
    }
    let json = serde_json::to_string_pretty(points)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Generated: {}", path.display());
    Ok(())
}

/// Run one full report pass: load, decode, aggregate, then render. Nothing is
/// written unless every record decodes.
pub fn run_report(config: &ReportConfig, options: &ReportOptions) -> Result<Vec<PathBuf>> {
    let records = load_records(&options.input, config.grammar)?;
    info!(
        family = config.grammar.name(),
        rows = records.len(),
        input = %options.input.display(),
        "loaded benchmark results"
    );

    let points = aggregate_records(records, config)
        .with_context(|| format!("Failed to decode {}", options.input.display()))?;

    print_summary(&points);

    if let Some(json_path) = &options.json {
        write_json(&points, json_path)?;
    }

    println!("\nGenerating charts...");
    let figures = build_figures(&points, config);
    let mut written = Vec::with_capacity(figures.len());
    for figure in &figures {
        let empty = figure.panels.iter().filter(|p| p.is_empty()).count();
        if empty > 0 {
            info!(file = %figure.file_name, empty, "figure has panels without data");
        }
        written.push(render_figure(figure, &options.output_dir)?);
    }

    println!("\nReport complete!");
    Ok(written)
}
