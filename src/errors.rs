use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum BenchPlotError {
    #[error("Input file not found: {}", .0.display())]
    #[diagnostic(
        code("BENCHPLOT-001"),
        help("Run the C++ benchmark program first to produce the results CSV.")
    )]
    MissingInput(PathBuf),

    #[error("Malformed input: {0}")]
    #[diagnostic(
        code("BENCHPLOT-002"),
        help("Expected columns: Size, InsertionSort_us, HeapSort_us, StdSort_us with numeric values.")
    )]
    MalformedInput(String),

    #[error("I/O error: {0}")]
    #[diagnostic(code("BENCHPLOT-003"), help("Check file paths and permissions."))]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    #[diagnostic(
        code("BENCHPLOT-004"),
        help("The CSV file could not be parsed.")
    )]
    Polars(#[from] polars::error::PolarsError),

    #[error("Rendering error: {0}")]
    #[diagnostic(
        code("BENCHPLOT-005"),
        help("The chart could not be drawn or written. Check that system fonts are installed.")
    )]
    Render(String),

    #[error(transparent)]
    #[diagnostic(code("BENCHPLOT-000"))]
    Unknown(#[from] anyhow::Error),
}

pub type BenchPlotResult<T> = Result<T, BenchPlotError>;
