use benchplot::errors::BenchPlotError;
use benchplot::report;
use benchplot::runner::{self, RunConfig, DEFAULT_INPUT, DEFAULT_OUTPUT};
use clap::{Parser, ValueEnum};
use miette::Result;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Clone, ValueEnum, Debug)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "benchplot")]
#[command(version = "0.1.0")]
#[command(about = "Plot sorting-algorithm benchmark results", long_about = None)]
struct Cli {
    /// Benchmark results CSV
    #[arg(long, value_name = "CSV", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the chart image
    #[arg(long, value_name = "PNG", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Print speedup statistics after the summary
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (Info -> Debug)
    #[arg(short, long)]
    verbose: bool,

    /// Silence all logs
    #[arg(short, long)]
    quiet: bool,

    /// Log format (text or json)
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    // BENCHPLOT_LOG > CLI args
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var("BENCHPLOT_LOG")
        .from_env_lossy();

    // stdout carries the report, logs go to stderr
    match cli.log_format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .json()
                .with_span_list(false)
                .with_current_span(false)
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    let run_id = Uuid::new_v4();
    let _span = tracing::info_span!("root", run_id = %run_id).entered();

    let config = RunConfig {
        input: cli.input,
        output: cli.output,
        stats: cli.stats,
        progress: !cli.quiet && std::io::stderr().is_terminal(),
        run_id,
        ..Default::default()
    };

    match runner::run(&config) {
        Ok(_) => Ok(()),
        Err(BenchPlotError::MissingInput(path)) => {
            for line in report::missing_input_lines(&runner::display_name(&path)) {
                println!("{}", line);
            }
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
