//! Comparison charts and summaries for sorting-algorithm benchmark results.
//!
//! Reads the CSV written by the benchmark program, draws linear and log-log
//! timing charts into one PNG, and prints a per-size summary.

pub mod errors;
pub mod io;
pub mod observability;
pub mod render;
pub mod report;
pub mod runner;
pub mod speedup;
pub mod table;

pub use errors::{BenchPlotError, BenchPlotResult};
pub use table::{BenchmarkRow, BenchmarkTable};
