//! Speedup digest
//!
//! Relative performance between the three algorithms: where heap sort
//! overtakes insertion sort, how heap sort compares to std::sort on average,
//! and the ratios on the largest array tested.

use crate::table::{BenchmarkRow, BenchmarkTable};
use serde::Serialize;
use std::fmt;

const SLOWER_THRESHOLD: f64 = 1.2;
const FASTER_THRESHOLD: f64 = 0.8;
const SLOW_TAG_THRESHOLD: f64 = 1.5;
const FAST_TAG_THRESHOLD: f64 = 0.67;

/// First size at which heap sort beats a measured insertion sort.
pub fn crossover_size(table: &BenchmarkTable) -> Option<i64> {
    table
        .rows()
        .iter()
        .find(|r| r.insertion_us > 0.0 && r.heap_us > 0.0 && r.heap_us < r.insertion_us)
        .map(|r| r.size)
}

/// Mean of heap/std::sort over the rows where std::sort has a positive timing.
pub fn mean_heap_std_ratio(table: &BenchmarkTable) -> Option<f64> {
    let ratios: Vec<f64> = table
        .rows()
        .iter()
        .filter(|r| r.std_sort_us > 0.0)
        .map(|r| r.heap_us / r.std_sort_us)
        .collect();

    if ratios.is_empty() {
        None
    } else {
        Some(ratios.iter().sum::<f64>() / ratios.len() as f64)
    }
}

/// Per-size label for a heap/std::sort ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioTag {
    Slow,
    Fast,
    Equal,
}

impl RatioTag {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > SLOW_TAG_THRESHOLD {
            RatioTag::Slow
        } else if ratio < FAST_TAG_THRESHOLD {
            RatioTag::Fast
        } else {
            RatioTag::Equal
        }
    }
}

impl fmt::Display for RatioTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioTag::Slow => write!(f, "slow"),
            RatioTag::Fast => write!(f, "fast"),
            RatioTag::Equal => write!(f, "≈equal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeRatio {
    pub size: i64,
    pub ratio: f64,
    pub tag: RatioTag,
}

/// heap/std::sort for every row where std::sort has a positive timing, in row order.
pub fn heap_std_ratios(table: &BenchmarkTable) -> Vec<SizeRatio> {
    table
        .rows()
        .iter()
        .filter(|r| r.std_sort_us > 0.0)
        .map(|r| {
            let ratio = r.heap_us / r.std_sort_us;
            SizeRatio {
                size: r.size,
                ratio,
                tag: RatioTag::from_ratio(ratio),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "verdict", content = "percent", rename_all = "snake_case")]
pub enum Verdict {
    /// Heap sort slower than std::sort by this many percent.
    Slower(f64),
    /// Heap sort faster than std::sort by this many percent.
    Faster(f64),
    Comparable,
}

impl Verdict {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > SLOWER_THRESHOLD {
            Verdict::Slower((ratio - 1.0) * 100.0)
        } else if ratio < FASTER_THRESHOLD {
            Verdict::Faster((1.0 - ratio) * 100.0)
        } else {
            Verdict::Comparable
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Slower(p) => write!(f, "Heap is slower by {:.0}%", p),
            Verdict::Faster(p) => write!(f, "Heap is faster by {:.0}%", p),
            Verdict::Comparable => write!(f, "comparable performance"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedupDigest {
    pub ratios: Vec<SizeRatio>,
    pub crossover_size: Option<i64>,
    pub mean_heap_std_ratio: Option<f64>,
    pub verdict: Option<Verdict>,
    pub smallest_size: i64,
    pub largest: BenchmarkRowStats,
}

/// Timings and ratios on the last (largest) row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRowStats {
    pub size: i64,
    pub insertion_us: Option<f64>,
    pub heap_us: f64,
    pub std_sort_us: f64,
    /// insertion / heap, when insertion sort was measured.
    pub insertion_heap_ratio: Option<f64>,
    /// heap / std::sort
    pub heap_std_ratio: Option<f64>,
}

impl From<&BenchmarkRow> for BenchmarkRowStats {
    fn from(row: &BenchmarkRow) -> Self {
        let insertion_us = (row.insertion_us > 0.0).then_some(row.insertion_us);
        Self {
            size: row.size,
            insertion_us,
            heap_us: row.heap_us,
            std_sort_us: row.std_sort_us,
            insertion_heap_ratio: insertion_us
                .filter(|_| row.heap_us > 0.0)
                .map(|ins| ins / row.heap_us),
            heap_std_ratio: (row.heap_us > 0.0 && row.std_sort_us > 0.0)
                .then(|| row.heap_us / row.std_sort_us),
        }
    }
}

impl SpeedupDigest {
    /// `None` for tables with fewer than two rows.
    pub fn from_table(table: &BenchmarkTable) -> Option<Self> {
        let rows = table.rows();
        if rows.len() < 2 {
            return None;
        }
        let first = rows.first()?;
        let last = rows.last()?;

        let mean = mean_heap_std_ratio(table);
        Some(Self {
            ratios: heap_std_ratios(table),
            crossover_size: crossover_size(table),
            mean_heap_std_ratio: mean,
            verdict: mean.map(Verdict::from_ratio),
            smallest_size: first.size,
            largest: BenchmarkRowStats::from(last),
        })
    }
}

impl fmt::Display for SpeedupDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Speedup ===")?;
        if !self.ratios.is_empty() {
            writeln!(f, "Heap/std::sort ratio by size:")?;
            for r in &self.ratios {
                writeln!(f, "  Size {}: {:.2}x ({})", r.size, r.ratio, r.tag)?;
            }
        }
        if let Some(size) = self.crossover_size {
            writeln!(
                f,
                "Crossover point (Heap becomes faster than Insertion): n ≈ {}",
                size
            )?;
        }
        if let (Some(mean), Some(verdict)) = (self.mean_heap_std_ratio, self.verdict) {
            writeln!(f, "Average Heap/std::sort ratio: {:.2}x ({})", mean, verdict)?;
        }
        writeln!(f, "Smallest array tested: {} elements", self.smallest_size)?;
        writeln!(f, "Largest array tested: {} elements", self.largest.size)?;

        let last = &self.largest;
        writeln!(f)?;
        writeln!(f, "Performance on largest array (n={}):", last.size)?;
        if let Some(ins) = last.insertion_us {
            writeln!(f, "  Insertion Sort: {:.1} us", ins)?;
        }
        writeln!(f, "  Heap Sort:      {:.1} us", last.heap_us)?;
        writeln!(f, "  std::sort:      {:.1} us", last.std_sort_us)?;
        if let Some(ratio) = last.insertion_heap_ratio {
            writeln!(f, "  Heap is {:.1}x faster than Insertion", ratio)?;
        }
        if let Some(ratio) = last.heap_std_ratio {
            writeln!(f, "  std::sort is {:.1}x faster than Heap", ratio)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> BenchmarkTable {
        BenchmarkTable::new(vec![
            BenchmarkRow::new(10, 1.0, 2.0, 1.0),
            BenchmarkRow::new(100, 40.0, 30.0, 10.0),
            BenchmarkRow::new(1000, 4000.0, 400.0, 100.0),
        ])
    }

    #[test]
    fn test_crossover_size() {
        assert_eq!(crossover_size(&table()), Some(100));

        let never = BenchmarkTable::new(vec![
            BenchmarkRow::new(10, 1.0, 2.0, 1.0),
            BenchmarkRow::new(100, -1.0, 30.0, 10.0),
        ]);
        assert_eq!(crossover_size(&never), None);
    }

    #[test]
    fn test_mean_heap_std_ratio() {
        // (2 + 3 + 4) / 3
        let mean = mean_heap_std_ratio(&table()).unwrap();
        assert!((mean - 3.0).abs() < 1e-9);

        let no_std = BenchmarkTable::new(vec![BenchmarkRow::new(10, 1.0, 2.0, 0.0)]);
        assert_eq!(mean_heap_std_ratio(&no_std), None);
    }

    #[test]
    fn test_verdict() {
        assert_eq!(Verdict::from_ratio(1.0), Verdict::Comparable);
        assert!(matches!(Verdict::from_ratio(1.5), Verdict::Slower(p) if (p - 50.0).abs() < 1e-9));
        assert!(matches!(Verdict::from_ratio(0.5), Verdict::Faster(p) if (p - 50.0).abs() < 1e-9));
        assert_eq!(Verdict::from_ratio(3.0).to_string(), "Heap is slower by 200%");
    }

    #[test]
    fn test_heap_std_ratios_tagged() {
        let table = BenchmarkTable::new(vec![
            BenchmarkRow::new(10, 1.0, 2.0, 1.0),
            BenchmarkRow::new(100, 40.0, 5.0, 10.0),
            BenchmarkRow::new(1000, 4000.0, 110.0, 100.0),
            BenchmarkRow::new(5000, 0.0, 30.0, 0.0),
        ]);

        let ratios = heap_std_ratios(&table);

        let sizes: Vec<i64> = ratios.iter().map(|r| r.size).collect();
        assert_eq!(sizes, vec![10, 100, 1000]);
        assert_eq!(ratios[0].tag, RatioTag::Slow);
        assert_eq!(ratios[1].tag, RatioTag::Fast);
        assert_eq!(ratios[2].tag, RatioTag::Equal);

        let text = SpeedupDigest::from_table(&table).unwrap().to_string();
        assert!(text.contains("  Size 10: 2.00x (slow)"), "digest: {}", text);
        assert!(text.contains("  Size 100: 0.50x (fast)"), "digest: {}", text);
        assert!(text.contains("  Size 1000: 1.10x (≈equal)"), "digest: {}", text);
        assert!(!text.contains("Size 5000:"), "digest: {}", text);
    }

    #[test]
    fn test_digest_needs_two_rows() {
        let single = BenchmarkTable::new(vec![BenchmarkRow::new(10, 1.0, 2.0, 1.0)]);
        assert!(SpeedupDigest::from_table(&single).is_none());
    }

    #[test]
    fn test_digest_largest_row() {
        let digest = SpeedupDigest::from_table(&table()).unwrap();
        assert_eq!(digest.smallest_size, 10);
        assert_eq!(digest.largest.size, 1000);
        assert_eq!(digest.largest.insertion_heap_ratio, Some(10.0));
        assert_eq!(digest.largest.heap_std_ratio, Some(4.0));

        let text = digest.to_string();
        assert!(text.contains("Crossover point (Heap becomes faster than Insertion): n ≈ 100"));
        assert!(text.contains("Average Heap/std::sort ratio: 3.00x (Heap is slower by 200%)"));
        assert!(text.contains("  Heap is 10.0x faster than Insertion"));
    }

    #[test]
    fn test_digest_without_insertion() {
        let table = BenchmarkTable::new(vec![
            BenchmarkRow::new(10, 1.0, 2.0, 1.0),
            BenchmarkRow::new(100000, 0.0, 300.0, 100.0),
        ]);
        let digest = SpeedupDigest::from_table(&table).unwrap();
        assert_eq!(digest.largest.insertion_us, None);
        assert!(!digest.to_string().contains("Insertion Sort:"));
    }
}
