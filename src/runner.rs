use crate::errors::{BenchPlotError, BenchPlotResult};
use crate::io;
use crate::observability::{InputFileStats, RunMetrics, RunSummary};
use crate::render::{self, FigureStyle};
use crate::report;
use crate::speedup::SpeedupDigest;
use crate::table::BenchmarkTable;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

pub const DEFAULT_INPUT: &str = "../random_results.csv";
pub const DEFAULT_OUTPUT: &str = "../performance_graph.png";

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub style: FigureStyle,
    /// Print the speedup digest after the summary.
    pub stats: bool,
    pub progress: bool,
    pub run_id: Uuid,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            style: FigureStyle::default(),
            stats: false,
            progress: false,
            run_id: Uuid::new_v4(),
        }
    }
}

#[derive(Debug)]
pub struct RunOutcome {
    pub table: BenchmarkTable,
    pub output: PathBuf,
    pub insertion_plotted: bool,
}

/// File name for user-facing messages, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn run(config: &RunConfig) -> BenchPlotResult<RunOutcome> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(config, &mut out)
}

/// Load, render, report. The chart is only written once the table has loaded.
pub fn run_with_output<W: Write>(config: &RunConfig, out: &mut W) -> BenchPlotResult<RunOutcome> {
    let mut metrics = RunMetrics::new();
    writeln!(out, "{}", report::BANNER)?;

    // 1. Load
    info!("Reading input: {:?}", config.input);
    let table = metrics.time_step("load", || io::load_table(&config.input))?;
    metrics.rows_read = table.len();
    writeln!(out, "{}", report::loaded_sizes_line(&table))?;

    // 2. Render
    let figure = render::build_figure(&table);
    let insertion_plotted = table.insertion_measured();
    info!(
        "Rendering {} panels to {:?} (insertion sort plotted: {})",
        figure.panels.len(),
        config.output,
        insertion_plotted
    );

    let pb = if config.progress {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .map_err(|e| BenchPlotError::Unknown(e.into()))?,
    );
    pb.set_message("Rendering charts...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let rendered = metrics.time_step("render", || {
        render::render_figure(&figure, &config.output, &config.style)
    });
    pb.finish_and_clear();
    rendered?;
    writeln!(out, "{}", report::saved_line(&display_name(&config.output)))?;

    // 3. Report
    report::write_summary(out, &table)?;
    if config.stats {
        match SpeedupDigest::from_table(&table) {
            Some(digest) => {
                debug!(
                    "Speedup digest: {}",
                    serde_json::to_string(&digest).map_err(|e| BenchPlotError::Unknown(e.into()))?
                );
                writeln!(out)?;
                write!(out, "{}", digest)?;
            }
            None => info!("Speedup digest needs at least two rows, skipping"),
        }
    }

    log_run_summary(config, metrics, insertion_plotted);

    Ok(RunOutcome {
        table,
        output: config.output.clone(),
        insertion_plotted,
    })
}

fn log_run_summary(config: &RunConfig, metrics: RunMetrics, insertion_plotted: bool) {
    let input = match InputFileStats::collect(&config.input) {
        Ok(stats) => stats,
        Err(e) => {
            debug!("Could not fingerprint input {:?}: {}", config.input, e);
            return;
        }
    };

    let summary = RunSummary {
        run_id: config.run_id.to_string(),
        timestamp: Utc::now(),
        input,
        output: config.output.display().to_string(),
        insertion_plotted,
        total_ms: metrics.total_duration().as_millis() as u64,
        metrics,
    };

    match serde_json::to_string(&summary) {
        Ok(json) => debug!("Run summary: {}", json),
        Err(e) => debug!("Could not serialize run summary: {}", e),
    }
    info!("Done.");
}
