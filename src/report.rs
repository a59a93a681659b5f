use crate::table::{BenchmarkRow, BenchmarkTable};
use std::io::{self, Write};

pub const BANNER: &str = "=== Sorting Algorithms Plot Generator ===";
pub const SUMMARY_HEADER: &str = "=== Summary ===";

/// `Size <N>: Insertion=<X>us, Heap=<Y>us, std::sort=<Z>us`, one decimal per timing.
pub fn summary_line(row: &BenchmarkRow) -> String {
    format!(
        "Size {}: Insertion={:.1}us, Heap={:.1}us, std::sort={:.1}us",
        row.size, row.insertion_us, row.heap_us, row.std_sort_us
    )
}

pub fn summary_lines(table: &BenchmarkTable) -> Vec<String> {
    table.rows().iter().map(summary_line).collect()
}

/// `[100, 200]`, sizes in row order.
pub fn format_sizes(sizes: &[i64]) -> String {
    let joined: Vec<String> = sizes.iter().map(|s| s.to_string()).collect();
    format!("[{}]", joined.join(", "))
}

pub fn loaded_sizes_line(table: &BenchmarkTable) -> String {
    format!("Loaded data for sizes: {}", format_sizes(&table.sizes()))
}

pub fn saved_line(file_name: &str) -> String {
    format!("Graph saved as '{}'", file_name)
}

pub fn missing_input_lines(file_name: &str) -> [String; 2] {
    [
        format!("ERROR: '{}' not found!", file_name),
        "Please run the C++ program first.".to_string(),
    ]
}

pub fn write_summary<W: Write>(out: &mut W, table: &BenchmarkTable) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", SUMMARY_HEADER)?;
    for line in summary_lines(table) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line_format() {
        let row = BenchmarkRow::new(1000, 5.24, 3.15, 1.0);
        assert_eq!(
            summary_line(&row),
            "Size 1000: Insertion=5.2us, Heap=3.1us, std::sort=1.0us"
        );
    }

    #[test]
    fn test_summary_line_keeps_sentinel() {
        let row = BenchmarkRow::new(5000, -1.0, 30.0, 4.0);
        assert_eq!(
            summary_line(&row),
            "Size 5000: Insertion=-1.0us, Heap=30.0us, std::sort=4.0us"
        );
    }

    #[test]
    fn test_one_line_per_row() {
        let table = BenchmarkTable::new(vec![
            BenchmarkRow::new(100, 1.0, 2.0, 0.5),
            BenchmarkRow::new(200, 2.0, 4.0, 1.0),
            BenchmarkRow::new(400, 8.04, 8.5, 2.24),
        ]);
        let lines = summary_lines(&table);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Size 100: Insertion=1.0us, Heap=2.0us, std::sort=0.5us");
        assert_eq!(lines[2], "Size 400: Insertion=8.0us, Heap=8.5us, std::sort=2.2us");
    }

    #[test]
    fn test_loaded_sizes_line() {
        let table = BenchmarkTable::new(vec![
            BenchmarkRow::new(100, 1.0, 2.0, 0.5),
            BenchmarkRow::new(200, 2.0, 4.0, 1.0),
        ]);
        assert_eq!(loaded_sizes_line(&table), "Loaded data for sizes: [100, 200]");
        assert_eq!(format_sizes(&[]), "[]");
    }

    #[test]
    fn test_write_summary() {
        let table = BenchmarkTable::new(vec![BenchmarkRow::new(10, 0.04, 0.05, 0.06)]);
        let mut out = Vec::new();
        write_summary(&mut out, &table).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\n=== Summary ===\nSize 10: Insertion=0.0us, Heap=0.1us, std::sort=0.1us\n"
        );
    }

    #[test]
    fn test_missing_input_lines() {
        let lines = missing_input_lines("random_results.csv");
        assert_eq!(lines[0], "ERROR: 'random_results.csv' not found!");
        assert_eq!(lines[1], "Please run the C++ program first.");
    }
}
