use crate::errors::{BenchPlotError, BenchPlotResult};
use crate::table::{
    BenchmarkRow, BenchmarkTable, HEAP_COLUMN, INSERTION_COLUMN, SIZE_COLUMN, STD_SORT_COLUMN,
};
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

pub fn read_csv<P: AsRef<Path>>(path: P) -> BenchPlotResult<LazyFrame> {
    LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()
        .map_err(BenchPlotError::Polars)
}

/// Fails with [`BenchPlotError::MissingInput`] when `path` does not exist.
pub fn ensure_exists<P: AsRef<Path>>(path: P) -> BenchPlotResult<()> {
    let path = path.as_ref();
    if path.exists() {
        Ok(())
    } else {
        Err(BenchPlotError::MissingInput(path.to_path_buf()))
    }
}

/// Load the benchmark CSV into a [`BenchmarkTable`], keeping file row order.
///
/// Columns are looked up by name, so their order in the file does not matter
/// and extra columns are ignored.
pub fn load_table<P: AsRef<Path>>(path: P) -> BenchPlotResult<BenchmarkTable> {
    let path = path.as_ref();
    ensure_exists(path)?;

    let df = read_csv(path)?.collect()?;
    debug!("Read {} rows, columns {:?}", df.height(), df.get_column_names());

    table_from_frame(&df)
}

pub fn table_from_frame(df: &DataFrame) -> BenchPlotResult<BenchmarkTable> {
    require_columns(df)?;

    let sizes = int_column(df, SIZE_COLUMN)?;
    let insertion = float_column(df, INSERTION_COLUMN)?;
    let heap = float_column(df, HEAP_COLUMN)?;
    let std_sort = float_column(df, STD_SORT_COLUMN)?;

    let rows = sizes
        .into_iter()
        .zip(insertion)
        .zip(heap)
        .zip(std_sort)
        .map(|(((size, ins), heap), std_us)| BenchmarkRow::new(size, ins, heap, std_us))
        .collect();

    Ok(BenchmarkTable::new(rows))
}

fn require_columns(df: &DataFrame) -> BenchPlotResult<()> {
    let present = df.get_column_names();
    let missing: Vec<&str> = [SIZE_COLUMN, INSERTION_COLUMN, HEAP_COLUMN, STD_SORT_COLUMN]
        .into_iter()
        .filter(|name| !present.iter().any(|p| p.as_str() == *name))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(BenchPlotError::MalformedInput(format!(
            "missing column(s): {}",
            missing.join(", ")
        )))
    }
}

fn int_column(df: &DataFrame, name: &str) -> BenchPlotResult<Vec<i64>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Int64)?;
    let values = series.i64()?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| non_numeric(name, row)))
        .collect()
}

fn float_column(df: &DataFrame, name: &str) -> BenchPlotResult<Vec<f64>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let values = series.f64()?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| non_numeric(name, row)))
        .collect()
}

fn non_numeric(column: &str, row: usize) -> BenchPlotError {
    // +1 for the header line, +1 for one-based line numbers
    BenchPlotError::MalformedInput(format!(
        "column '{}' has a missing or non-numeric value on line {}",
        column,
        row + 2
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_table() -> BenchPlotResult<()> {
        let dir = tempdir()?;
        let csv_path = dir.path().join("random_results.csv");
        fs::write(
            &csv_path,
            "Size,InsertionSort_us,HeapSort_us,StdSort_us\n100,1.0,2.0,0.5\n200,2.0,4.0,1.0\n",
        )?;

        let table = load_table(&csv_path)?;

        assert_eq!(table.sizes(), vec![100, 200]);
        assert_eq!(table.rows()[1], BenchmarkRow::new(200, 2.0, 4.0, 1.0));
        Ok(())
    }

    #[test]
    fn test_load_table_column_order_and_extras() -> BenchPlotResult<()> {
        let dir = tempdir()?;
        let csv_path = dir.path().join("results.csv");
        fs::write(
            &csv_path,
            "StdSort_us,Size,Iterations,HeapSort_us,InsertionSort_us\n1.0,1000,10,3.1,5.2\n2.0,2000,10,6.5,-1\n",
        )?;

        let table = load_table(&csv_path)?;

        assert_eq!(table.rows()[0], BenchmarkRow::new(1000, 5.2, 3.1, 1.0));
        assert_eq!(table.rows()[1], BenchmarkRow::new(2000, -1.0, 6.5, 2.0));
        assert!(!table.insertion_measured());
        Ok(())
    }

    #[test]
    fn test_missing_input() {
        let dir = tempdir().unwrap();
        let result = load_table(dir.path().join("random_results.csv"));
        assert!(matches!(result, Err(BenchPlotError::MissingInput(_))));
    }

    #[test]
    fn test_missing_column() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("results.csv");
        fs::write(&csv_path, "Size,HeapSort_us,StdSort_us\n100,2.0,0.5\n").unwrap();

        match load_table(&csv_path) {
            Err(BenchPlotError::MalformedInput(msg)) => {
                assert!(msg.contains("InsertionSort_us"), "unexpected message: {}", msg)
            }
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_value() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("results.csv");
        fs::write(
            &csv_path,
            "Size,InsertionSort_us,HeapSort_us,StdSort_us\n100,1.0,2.0,0.5\n200,2.0,n/a,1.0\n",
        )
        .unwrap();

        match load_table(&csv_path) {
            Err(BenchPlotError::MalformedInput(msg)) => {
                assert!(msg.contains("HeapSort_us"), "unexpected message: {}", msg);
                assert!(msg.contains("line 3"), "unexpected message: {}", msg);
            }
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_table_from_frame() -> BenchPlotResult<()> {
        let df = df! {
            "Size" => &[1000i64, 2000],
            "InsertionSort_us" => &[5.2, 20.1],
            "HeapSort_us" => &[3.1, 6.5],
            "StdSort_us" => &[1.0, 2.0]
        }?;

        let table = table_from_frame(&df)?;
        assert_eq!(table.len(), 2);
        assert!(table.insertion_measured());
        Ok(())
    }
}
