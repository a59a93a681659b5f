//! In-memory benchmark table
//!
//! One row per tested array size, in the order the benchmark program wrote them.

pub const SIZE_COLUMN: &str = "Size";
pub const INSERTION_COLUMN: &str = "InsertionSort_us";
pub const HEAP_COLUMN: &str = "HeapSort_us";
pub const STD_SORT_COLUMN: &str = "StdSort_us";

/// A single measurement row. Timings are microseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkRow {
    pub size: i64,
    /// Non-positive when insertion sort was not measured for this size.
    pub insertion_us: f64,
    pub heap_us: f64,
    pub std_sort_us: f64,
}

impl BenchmarkRow {
    pub fn new(size: i64, insertion_us: f64, heap_us: f64, std_sort_us: f64) -> Self {
        Self {
            size,
            insertion_us,
            heap_us,
            std_sort_us,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkTable {
    rows: Vec<BenchmarkRow>,
}

impl BenchmarkTable {
    pub fn new(rows: Vec<BenchmarkRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[BenchmarkRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn sizes(&self) -> Vec<i64> {
        self.rows.iter().map(|r| r.size).collect()
    }

    pub fn insertion_times(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.insertion_us).collect()
    }

    pub fn heap_times(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.heap_us).collect()
    }

    pub fn std_sort_times(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.std_sort_us).collect()
    }

    /// True when every insertion-sort timing is a real measurement.
    pub fn insertion_measured(&self) -> bool {
        all_positive(&self.insertion_times())
    }
}

/// `true` if every value is strictly positive. Vacuously true for an empty slice.
pub fn all_positive(values: &[f64]) -> bool {
    values.iter().all(|v| *v > 0.0)
}
